use std::collections::HashMap;
use std::sync::Mutex;

use log::{info, warn};

use crate::fetcher::PageSource;
use crate::formatter::{self, MenuOption, Selection};
use crate::parser;

pub const CHOOSE_GROUP_TEXT: &str = "Выберите группу:";
pub const GROUP_FIRST_TEXT: &str = "Сначала выберите группу.";
pub const FETCH_FAILED_TEXT: &str = "Ошибка: не удалось получить расписание с сайта.";

/// Identifies one user's conversation. The Telegram adapter fills it
/// with the chat id; the flow itself does not care where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub i64);

/// The two inbound shapes the flow understands.
#[derive(Debug, Clone)]
pub enum Event {
    SessionStarted,
    Selected(String),
}

/// A trait, necessary for every entity that will deliver the flow's
/// answers back to the user.
#[allow(async_fn_in_trait)]
pub trait Responder {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn send_text(&self, session: SessionId, text: &str) -> Result<(), Self::Error>;
    async fn send_menu(
        &self,
        session: SessionId,
        text: &str,
        options: &[MenuOption],
    ) -> Result<(), Self::Error>;
}

/// The two-step group-then-date conversation. Holds the chosen group per
/// session, keyed by [`SessionId`], so concurrent users never observe
/// each other's selection.
pub struct Conversation<P> {
    pages: P,
    sessions: Mutex<HashMap<SessionId, String>>,
}

impl<P: PageSource> Conversation<P> {
    pub fn new(pages: P) -> Self {
        Self {
            pages,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Handles one inbound event. Fetch failures become short user-visible
    /// texts; the flow keeps accepting further events afterwards.
    pub async fn handle<R: Responder>(
        &self,
        session: SessionId,
        event: Event,
        out: &R,
    ) -> Result<(), R::Error> {
        match event {
            Event::SessionStarted => {
                info!("Session {}: started", session.0);
                out.send_menu(session, CHOOSE_GROUP_TEXT, &formatter::group_menu())
                    .await
            }
            Event::Selected(token) => match Selection::from_token(&token) {
                Some(Selection::Group(group)) => self.group_chosen(session, group, out).await,
                Some(Selection::Date(date)) => self.date_chosen(session, date, out).await,
                None => {
                    warn!("Session {}: ignoring unknown token {:?}", session.0, token);
                    Ok(())
                }
            },
        }
    }

    async fn group_chosen<R: Responder>(
        &self,
        session: SessionId,
        group: String,
        out: &R,
    ) -> Result<(), R::Error> {
        info!("Session {}: group {} chosen", session.0, group);
        self.sessions
            .lock()
            .unwrap()
            .insert(session, group.clone());

        // A failed fetch and a page without dates collapse into the same
        // degraded answer; the distinction only reaches the log.
        let dates = match self.pages.fetch_page(&[]).await {
            Ok(markup) => parser::extract_dates(&markup),
            Err(err) => {
                warn!("Session {}: fetching dates failed: {}", session.0, err);
                Vec::new()
            }
        };

        if dates.is_empty() {
            out.send_text(session, FETCH_FAILED_TEXT).await
        } else {
            out.send_menu(
                session,
                &format!("Группа {group}. Выберите дату:"),
                &formatter::date_menu(&dates),
            )
            .await
        }
    }

    async fn date_chosen<R: Responder>(
        &self,
        session: SessionId,
        date: String,
        out: &R,
    ) -> Result<(), R::Error> {
        let group = self.sessions.lock().unwrap().get(&session).cloned();
        let Some(group) = group else {
            info!("Session {}: date before group, prompting", session.0);
            return out.send_text(session, GROUP_FIRST_TEXT).await;
        };

        info!("Session {}: date {} chosen for group {}", session.0, date, group);
        match self
            .pages
            .fetch_page(&[("group", group.as_str()), ("date", date.as_str())])
            .await
        {
            Ok(markup) => {
                let schedule = parser::parse_schedule(&markup);
                out.send_text(session, &formatter::format_lessons(&group, &date, &schedule))
                    .await
            }
            Err(err) => {
                warn!("Session {}: fetching schedule failed: {}", session.0, err);
                out.send_text(session, FETCH_FAILED_TEXT).await
            }
        }
    }
}
