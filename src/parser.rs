use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::models::{Lesson, Schedule};

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{2}\.\d{2}\.\d{4}\b").expect("invalid regex: date"));

static ROW_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("invalid selector: tr"));

static CELL_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("invalid selector: td"));

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Collects every `dd.mm.yyyy` substring of the page's visible text,
/// deduplicated and sorted ascending. Fixed-width zero-padded fields make
/// the lexicographic order chronological. Day and month values are not
/// range-checked.
pub fn extract_dates(markup: &str) -> Vec<String> {
    let document = Html::parse_document(markup);
    let text = document.root_element().text().collect::<String>();
    let dates = DATE_RE
        .find_iter(&text)
        .map(|m| m.as_str().to_owned())
        .collect::<BTreeSet<_>>();
    dates.into_iter().collect()
}

/// Walks every table row of the page; a row with at least four cells
/// yields a [`Lesson`] from its first four cells, shorter rows are
/// skipped. Rows keep document order. Zero qualifying rows yield
/// [`Schedule::NoLessons`], which also swallows a page whose table
/// layout changed.
pub fn parse_schedule(markup: &str) -> Schedule {
    let document = Html::parse_document(markup);

    let mut lessons = Vec::new();
    for row in document.select(&ROW_SEL) {
        let cells = row.select(&CELL_SEL).collect::<Vec<_>>();
        if cells.len() >= 4 {
            lessons.push(Lesson {
                time: elem_text(cells[0]),
                subject: elem_text(cells[1]),
                teacher: elem_text(cells[2]),
                room: elem_text(cells[3]),
            });
        }
    }

    if lessons.is_empty() {
        Schedule::NoLessons
    } else {
        Schedule::Lessons(lessons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_dates_from_footer_text() {
        let markup = "<html><body><p>Расписание обновлено, \
                      занятия 01.09.2025 и 02.09.2025 идут по плану.</p></body></html>";
        assert_eq!(extract_dates(markup), vec!["01.09.2025", "02.09.2025"]);
    }

    #[test]
    fn extract_dates_sorts_and_dedups() {
        let markup = "<div>15.10.2025 потом 03.09.2025 и снова 15.10.2025</div>";
        assert_eq!(extract_dates(markup), vec!["03.09.2025", "15.10.2025"]);
    }

    #[test]
    fn extract_dates_requires_word_boundaries() {
        // A fifth digit glues onto the year, so the match is rejected.
        let markup = "<p>номер 01.09.20255 не дата, а 433.09.2025 ею не станет</p>";
        assert_eq!(extract_dates(markup), Vec::<String>::new());
    }

    #[test]
    fn extract_dates_ignores_markup_only_dates() {
        // The pattern is matched against visible text, not raw markup.
        let markup = r#"<a href="/d/01.09.2025">листок</a>"#;
        assert_eq!(extract_dates(markup), Vec::<String>::new());
    }

    #[test]
    fn extract_dates_does_not_range_check() {
        let markup = "<p>99.99.9999</p>";
        assert_eq!(extract_dates(markup), vec!["99.99.9999"]);
    }

    #[test]
    fn parse_schedule_takes_first_four_cells() {
        let markup = "<table><tr>\
                      <td> 09:00 </td><td>Math</td><td>Ivanov</td><td>101</td><td>extra</td>\
                      </tr></table>";
        let expected = Lesson {
            time: "09:00".to_owned(),
            subject: "Math".to_owned(),
            teacher: "Ivanov".to_owned(),
            room: "101".to_owned(),
        };
        assert_eq!(parse_schedule(markup), Schedule::Lessons(vec![expected]));
    }

    #[test]
    fn parse_schedule_skips_short_rows_keeps_order() {
        let markup = "<table>\
                      <tr><td>08:30</td><td>Физика</td><td>Петров</td><td>202</td></tr>\
                      <tr><td>перемена</td></tr>\
                      <tr><td>10:15</td><td>Химия</td><td>Сидорова</td><td>303</td></tr>\
                      </table>";
        match parse_schedule(markup) {
            Schedule::Lessons(lessons) => {
                assert_eq!(lessons.len(), 2);
                assert_eq!(lessons[0].subject, "Физика");
                assert_eq!(lessons[1].subject, "Химия");
            }
            Schedule::NoLessons => panic!("expected two lessons"),
        }
    }

    #[test]
    fn parse_schedule_empty_page_is_no_lessons() {
        assert_eq!(parse_schedule("<html><body></body></html>"), Schedule::NoLessons);
    }

    #[test]
    fn parse_schedule_header_only_table_is_no_lessons() {
        // <th> cells do not count, so a header-only table parses as empty.
        let markup = "<table><tr><th>Время</th><th>Предмет</th><th>Преподаватель</th><th>Кабинет</th></tr></table>";
        assert_eq!(parse_schedule(markup), Schedule::NoLessons);
    }
}
