//! The conversation state machine.
//!
//! [`step`] is a pure function from the current phase and a classified
//! input to the effects the transport layer must apply: reply text, a
//! keyboard action, an optional admin notification and the session update.
//! No I/O happens here.

use serde::{Deserialize, Serialize};

/// Welcome and payment instructions, returned by `/start` and `/help`.
pub const START_TEXT: &str = "Hoş geldiniz. 🇹🇷\n\n\
    1) Ödemeyi yapın\n\
    2) TXID'yi buraya gönderin\n\n\
    TXID gönderildiğinde yöneticiye iletilecektir.";

/// Sent once a transaction id is accepted; asks for a contact method.
pub const ASK_CONTACT_TEXT: &str = "✅ TXID alındı.\n\n\
    📌 VIP grubuna eklenebilmeniz için **zorunlu** olarak:\n\
    • Telegram kullanıcı adınızı (@username) yazın\n\
    veya\n\
    • Aşağıdaki butondan telefon numaranızı gönderin.\n\n\
    ⚠️ Bu bilgi olmadan VIP erişimi verilmeyecektir.";

/// Sent after the contact method is collected and forwarded.
pub const CONFIRM_INFO_TEXT: &str =
    "✅ Bilgiler alındı. Yönetici kontrol edip sizi gruba ekleyecek.";

/// Re-prompt while a contact method is pending.
pub const CHOOSE_CONTACT_TEXT: &str =
    "⚠️ Lütfen @username yazın veya aşağıdaki butondan telefon numaranızı gönderin.";

/// Sent when no transaction id is pending and the input is not one.
pub const TXID_ONLY_TEXT: &str = "❌ Lütfen sadece TXID gönderin (başka mesaj yazmayın).";

/// Sent when a phone is shared before any transaction id.
pub const TXID_FIRST_TEXT: &str = "⚠️ Önce TXID gönderin, sonra telefon numaranızı gönderin.";

/// Conversation phase for one user, derived from the session store.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Phase {
    /// No pending transaction id.
    #[default]
    Idle,
    /// A transaction id is stored; a contact method is required next.
    AwaitingContact,
}

impl Phase {
    /// Derives the phase from the stored pending transaction id.
    #[must_use]
    pub fn from_pending(pending: Option<&str>) -> Self {
        if pending.is_some() {
            Self::AwaitingContact
        } else {
            Self::Idle
        }
    }
}

/// Who sent the message, as the admin notification needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitter {
    /// Telegram user id.
    pub id: i64,
    /// Display name (first + last as Telegram reports it).
    pub name: String,
    /// Profile username without the `@`, if the account has one.
    pub username: Option<String>,
}

/// The collected contact method, exactly one per completed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactMethod {
    /// `@`-prefixed handle the user typed.
    Handle(String),
    /// Phone number the user typed, separators already stripped.
    TypedPhone(String),
    /// Phone number shared via the contact button.
    SharedPhone(String),
}

/// A classified inbound event, transport details already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A transaction id in one of the accepted shapes.
    Txid(String),
    /// Any of the contact methods.
    Contact(ContactMethod),
    /// Everything else.
    Other,
}

/// What to do with the user's reply keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardAction {
    /// Leave whatever keyboard is currently shown.
    Unchanged,
    /// Show the one-time "share my phone number" keyboard.
    RequestPhone,
    /// Remove the custom keyboard.
    Remove,
}

/// How the pending transaction id must change after a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// Keep the stored value as is.
    Keep,
    /// Store (or replace) the pending transaction id.
    Store(String),
    /// Remove the pending transaction id.
    Clear,
}

/// A completed submission, ready to be rendered and forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Who submitted the transaction id.
    pub submitter: Submitter,
    /// The collected contact method.
    pub contact: ContactMethod,
    /// The pending transaction id being completed.
    pub txid: String,
}

/// Effects of one dialogue step.
///
/// The transport layer applies them in a fixed order: notification first,
/// then the session update, then the reply. A failed notification leaves
/// the session untouched, so the user can resend the contact method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Text to send back to the user.
    pub reply: &'static str,
    /// Keyboard change accompanying the reply.
    pub keyboard: KeyboardAction,
    /// Admin notification, present only when a submission completed.
    pub notification: Option<Notification>,
    /// Change to the stored pending transaction id.
    pub update: SessionUpdate,
}

/// Advances the conversation by one input.
///
/// `pending_txid` is the stored value for this user (phase
/// [`Phase::AwaitingContact`] when `Some`). A transaction id is accepted
/// from any phase and silently replaces a previous one; the admin is
/// notified only when the contact method completes the submission.
#[must_use]
pub fn step(submitter: &Submitter, pending_txid: Option<String>, input: Input) -> Step {
    match input {
        Input::Txid(txid) => Step {
            reply: ASK_CONTACT_TEXT,
            keyboard: KeyboardAction::RequestPhone,
            notification: None,
            update: SessionUpdate::Store(txid),
        },

        Input::Contact(contact) => match pending_txid {
            Some(txid) => Step {
                reply: CONFIRM_INFO_TEXT,
                keyboard: KeyboardAction::Remove,
                notification: Some(Notification {
                    submitter: submitter.clone(),
                    contact,
                    txid,
                }),
                update: SessionUpdate::Clear,
            },
            // Shared phones arrive through the contact button; drop the
            // stale keyboard instead of leaving it on screen.
            None => match contact {
                ContactMethod::SharedPhone(_) => Step {
                    reply: TXID_FIRST_TEXT,
                    keyboard: KeyboardAction::Remove,
                    notification: None,
                    update: SessionUpdate::Keep,
                },
                ContactMethod::Handle(_) | ContactMethod::TypedPhone(_) => Step {
                    reply: TXID_ONLY_TEXT,
                    keyboard: KeyboardAction::Unchanged,
                    notification: None,
                    update: SessionUpdate::Keep,
                },
            },
        },

        Input::Other => match pending_txid {
            Some(_) => Step {
                reply: CHOOSE_CONTACT_TEXT,
                keyboard: KeyboardAction::RequestPhone,
                notification: None,
                update: SessionUpdate::Keep,
            },
            None => Step {
                reply: TXID_ONLY_TEXT,
                keyboard: KeyboardAction::Unchanged,
                notification: None,
                update: SessionUpdate::Keep,
            },
        },
    }
}
