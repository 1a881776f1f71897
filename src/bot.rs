use std::sync::Arc;

use log::warn;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::command::BotCommands;

use crate::fetcher::SiteClient;
use crate::flow::{Conversation, Event, Responder, SessionId};
use crate::formatter::MenuOption;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "выбрать группу и дату")]
    Start,
}

/// One button per row, like the original page lists its groups.
fn keyboard(options: &[MenuOption]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(options.iter().map(|option| {
        vec![InlineKeyboardButton::callback(
            option.label.clone(),
            option.token.clone(),
        )]
    }))
}

/// Allows Bot to deliver the flow's answers via Telegram messages with
/// inline keyboards.
impl Responder for Bot {
    type Error = teloxide::RequestError;

    async fn send_text(&self, session: SessionId, text: &str) -> Result<(), Self::Error> {
        self.send_message(ChatId(session.0), text).await?;
        Ok(())
    }

    async fn send_menu(
        &self,
        session: SessionId,
        text: &str,
        options: &[MenuOption],
    ) -> Result<(), Self::Error> {
        self.send_message(ChatId(session.0), text)
            .reply_markup(keyboard(options))
            .await?;
        Ok(())
    }
}

async fn on_command(
    bot: Bot,
    message: Message,
    command: Command,
    conversation: Arc<Conversation<SiteClient>>,
) -> ResponseResult<()> {
    match command {
        Command::Start => {
            conversation
                .handle(SessionId(message.chat.id.0), Event::SessionStarted, &bot)
                .await
        }
    }
}

async fn on_callback(
    bot: Bot,
    query: CallbackQuery,
    conversation: Arc<Conversation<SiteClient>>,
) -> ResponseResult<()> {
    bot.answer_callback_query(query.id.clone()).await?;

    let Some(message) = query.message else {
        warn!("Callback query {} without a message, skipping", query.id);
        return Ok(());
    };
    let Some(token) = query.data else {
        return Ok(());
    };

    conversation
        .handle(
            SessionId(message.chat().id.0),
            Event::Selected(token),
            &bot,
        )
        .await
}

/// Runs the dispatch loop until shutdown. Updates for independent chats
/// are handled on independent tasks, which the per-session state of
/// [`Conversation`] is built for.
pub async fn run_bot(bot: Bot, conversation: Arc<Conversation<SiteClient>>) {
    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(on_command),
        )
        .branch(Update::filter_callback_query().endpoint(on_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![conversation])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
