use crate::models::{Schedule, GROUPS};

pub const NO_LESSONS_TEXT: &str = "Занятий нет.";

/// One selectable option of a menu: a label shown to the user and an
/// opaque token that comes back when the option is picked. Independent
/// of any messaging framework's button type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub label: String,
    pub token: String,
}

/// A user's pick, decoded from a menu token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Group(String),
    Date(String),
}

impl Selection {
    pub fn from_token(token: &str) -> Option<Self> {
        if let Some(group) = token.strip_prefix("group_") {
            Some(Selection::Group(group.to_owned()))
        } else if let Some(date) = token.strip_prefix("date_") {
            Some(Selection::Date(date.to_owned()))
        } else {
            None
        }
    }
}

/// One option per catalog group.
pub fn group_menu() -> Vec<MenuOption> {
    GROUPS
        .iter()
        .map(|group| MenuOption {
            label: (*group).to_owned(),
            token: format!("group_{group}"),
        })
        .collect()
}

/// One option per available date, labeled with the literal date string.
pub fn date_menu(dates: &[String]) -> Vec<MenuOption> {
    dates
        .iter()
        .map(|date| MenuOption {
            label: date.clone(),
            token: format!("date_{date}"),
        })
        .collect()
}

/// Renders the schedule answer: a `group | date` header, then one
/// `time subject teacher room` line per lesson in document order.
pub fn format_lessons(group: &str, date: &str, schedule: &Schedule) -> String {
    let body = match schedule {
        Schedule::Lessons(lessons) => lessons
            .iter()
            .map(|l| format!("{} {} {} {}", l.time, l.subject, l.teacher, l.room))
            .collect::<Vec<_>>()
            .join("\n"),
        Schedule::NoLessons => NO_LESSONS_TEXT.to_owned(),
    };
    format!("{group} | {date}\n\n{body}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Lesson;

    #[test]
    fn group_menu_covers_catalog() {
        let menu = group_menu();
        assert_eq!(menu.len(), GROUPS.len());
        assert_eq!(menu[1].label, "ИС-21");
        assert_eq!(menu[1].token, "group_ИС-21");
    }

    #[test]
    fn date_menu_labels_are_literal_dates() {
        let dates = vec!["01.09.2025".to_owned(), "02.09.2025".to_owned()];
        let menu = date_menu(&dates);
        assert_eq!(menu[0].label, "01.09.2025");
        assert_eq!(menu[0].token, "date_01.09.2025");
        assert_eq!(menu.len(), 2);
    }

    #[test]
    fn selection_roundtrips_tokens() {
        assert_eq!(
            Selection::from_token("group_ПИ-22"),
            Some(Selection::Group("ПИ-22".to_owned()))
        );
        assert_eq!(
            Selection::from_token("date_01.09.2025"),
            Some(Selection::Date("01.09.2025".to_owned()))
        );
        assert_eq!(Selection::from_token("weird_stuff"), None);
    }

    #[test]
    fn format_lessons_joins_fields_with_spaces() {
        let schedule = Schedule::Lessons(vec![Lesson {
            time: "09:00".to_owned(),
            subject: "Math".to_owned(),
            teacher: "Ivanov".to_owned(),
            room: "101".to_owned(),
        }]);
        assert_eq!(
            format_lessons("ИС-21", "01.09.2025", &schedule),
            "ИС-21 | 01.09.2025\n\n09:00 Math Ivanov 101"
        );
    }

    #[test]
    fn format_lessons_renders_empty_marker() {
        assert_eq!(
            format_lessons("ИС-21", "01.09.2025", &Schedule::NoLessons),
            "ИС-21 | 01.09.2025\n\nЗанятий нет."
        );
    }
}
