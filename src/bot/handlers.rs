//! Command and message handlers.
//!
//! Handlers stay thin: they extract transport details from the update,
//! classify the text, run one dialogue step and apply the returned
//! effects. All conversation rules live in [`crate::dialogue`].

use crate::classify::{classify, InputKind};
use crate::config::LOG_TEXT_PREVIEW_CHARS;
use crate::dialogue::{
    step, ContactMethod, Input, KeyboardAction, Phase, SessionUpdate, Step, Submitter, START_TEXT,
};
use crate::session::SessionStore;
use crate::utils::truncate_str;
use anyhow::{anyhow, Result};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{ButtonRequest, KeyboardButton, KeyboardMarkup, ReplyMarkup};
use teloxide::utils::command::BotCommands;
use tracing::info;

use super::notifier::AdminNotifier;

/// Supported commands for the bot
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    /// Show the welcome message
    #[command(description = "Start the bot.")]
    Start,
    /// Show the welcome message again
    #[command(description = "Show usage instructions.")]
    Help,
}

// Helper function to get user name from Message
fn get_user_name(msg: &Message) -> String {
    if let Some(ref user) = msg.from {
        if let Some(ref username) = user.username {
            return username.clone();
        }
        // first_name is String, not Option<String>
        if !user.first_name.is_empty() {
            return user.first_name.clone();
        }
    }
    "Unknown".to_string()
}

/// Safe extraction of user ID from a message.
/// Returns 0 if the user information is missing.
#[must_use]
pub fn get_user_id_safe(msg: &Message) -> i64 {
    msg.from.as_ref().map_or(0, |u| u.id.0.cast_signed())
}

fn submitter_from(msg: &Message) -> Submitter {
    msg.from.as_ref().map_or_else(
        || Submitter {
            id: 0,
            name: "Unknown".to_string(),
            username: None,
        },
        |user| Submitter {
            id: user.id.0.cast_signed(),
            name: user.full_name(),
            username: user.username.clone(),
        },
    )
}

/// Create the one-time keyboard with the phone share button
#[must_use]
pub fn phone_keyboard() -> KeyboardMarkup {
    let keyboard = vec![vec![
        KeyboardButton::new("📞 Telefon numaramı gönder").request(ButtonRequest::Contact)
    ]];
    KeyboardMarkup::new(keyboard)
        .resize_keyboard()
        .one_time_keyboard()
}

/// `/start` and `/help` handler
///
/// # Errors
///
/// Returns an error if the welcome message cannot be sent.
pub async fn start(bot: Bot, msg: Message) -> Result<()> {
    let user_id = get_user_id_safe(&msg);
    let user_name = get_user_name(&msg);

    info!("User {user_id} ({user_name}) requested the welcome message.");

    bot.send_message(msg.chat.id, START_TEXT).await?;
    Ok(())
}

/// Text message handler
///
/// # Errors
///
/// Returns an error if the forward to the admin or the reply fails.
pub async fn handle_text(
    bot: Bot,
    msg: Message,
    sessions: Arc<dyn SessionStore>,
    notifier: AdminNotifier,
) -> Result<()> {
    let text = msg.text().unwrap_or("").to_string();
    let user_id = get_user_id_safe(&msg);
    let user_name = get_user_name(&msg);

    let pending = sessions.get(user_id).await;
    let phase = Phase::from_pending(pending.as_deref());

    info!(
        "Handling text from user {user_id} ({user_name}) in {phase:?}. Text: '{}'",
        truncate_str(&text, LOG_TEXT_PREVIEW_CHARS)
    );

    let input = match classify(&text) {
        InputKind::Txid(txid) => Input::Txid(txid),
        InputKind::Handle(handle) => Input::Contact(ContactMethod::Handle(handle)),
        InputKind::Phone(phone) => Input::Contact(ContactMethod::TypedPhone(phone)),
        InputKind::Other => Input::Other,
    };

    let step = step(&submitter_from(&msg), pending, input);
    apply_step(&bot, &msg, &sessions, &notifier, user_id, step).await
}

/// Contact share handler
///
/// # Errors
///
/// Returns an error if the forward to the admin or the reply fails.
pub async fn handle_contact(
    bot: Bot,
    msg: Message,
    sessions: Arc<dyn SessionStore>,
    notifier: AdminNotifier,
) -> Result<()> {
    let contact = msg.contact().ok_or_else(|| anyhow!("No contact found"))?;
    let user_id = get_user_id_safe(&msg);

    info!("User {user_id} shared a contact via the keyboard button.");

    let pending = sessions.get(user_id).await;
    let input = Input::Contact(ContactMethod::SharedPhone(contact.phone_number.clone()));

    let step = step(&submitter_from(&msg), pending, input);
    apply_step(&bot, &msg, &sessions, &notifier, user_id, step).await
}

/// Applies the effects of one dialogue step, in a fixed order: admin
/// notification, session update, reply. A failed forward returns before
/// the session update, so the pending transaction id survives and the
/// user can resend the contact method.
async fn apply_step(
    bot: &Bot,
    msg: &Message,
    sessions: &Arc<dyn SessionStore>,
    notifier: &AdminNotifier,
    user_id: i64,
    step: Step,
) -> Result<()> {
    if let Some(notification) = &step.notification {
        notifier.notify(notification).await?;
    }

    match step.update {
        SessionUpdate::Keep => {}
        SessionUpdate::Store(txid) => {
            info!("Stored pending TXID for user {user_id}; awaiting contact method.");
            sessions.set(user_id, txid).await;
        }
        SessionUpdate::Clear => {
            info!("Submission complete for user {user_id}; session cleared.");
            sessions.clear(user_id).await;
        }
    }

    let send = bot.send_message(msg.chat.id, step.reply);
    match step.keyboard {
        KeyboardAction::Unchanged => send.await?,
        KeyboardAction::RequestPhone => send.reply_markup(phone_keyboard()).await?,
        KeyboardAction::Remove => send.reply_markup(ReplyMarkup::kb_remove()).await?,
    };

    Ok(())
}
