//! Admin notification rendering and delivery.
//!
//! A completed submission is rendered once and sent once to the fixed
//! administrator chat. There is no retry logic; a failed send propagates
//! to the caller, which keeps the submission pending.

use crate::dialogue::{ContactMethod, Notification};
use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};
use tracing::info;

/// Sends completed submissions to the administrator chat.
#[derive(Clone)]
pub struct AdminNotifier {
    bot: Bot,
    admin_chat: ChatId,
}

impl AdminNotifier {
    /// Create a notifier bound to the administrator chat.
    #[must_use]
    pub const fn new(bot: Bot, admin_chat: ChatId) -> Self {
        Self { bot, admin_chat }
    }

    /// Renders and sends one notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the Telegram send fails.
    pub async fn notify(&self, notification: &Notification) -> Result<()> {
        let text = render_notification(notification);

        self.bot
            .send_message(self.admin_chat, text)
            .parse_mode(ParseMode::Html)
            .await?;

        info!(
            "Forwarded submission from user {} to admin chat {}.",
            notification.submitter.id, self.admin_chat.0
        );
        Ok(())
    }
}

/// Renders the administrator-facing text for a completed submission.
///
/// User-sourced fields are HTML-escaped; the transaction id is wrapped in
/// `<code>` so it can be copied with one tap.
#[must_use]
pub fn render_notification(notification: &Notification) -> String {
    let header = match notification.contact {
        ContactMethod::Handle(_) => "✅ KULLANICI BİLGİSİ (USERNAME) GELDİ",
        ContactMethod::TypedPhone(_) | ContactMethod::SharedPhone(_) => {
            "📞 TELEFON BİLGİSİ GELDİ"
        }
    };

    let contact_line = match &notification.contact {
        ContactMethod::Handle(handle) => {
            format!("Username (yazdı): {}", html_escape::encode_text(handle))
        }
        ContactMethod::TypedPhone(phone) => {
            format!("Telefon (yazdı): {}", html_escape::encode_text(phone))
        }
        ContactMethod::SharedPhone(phone) => {
            format!("Telefon: {}", html_escape::encode_text(phone))
        }
    };

    let username_display = notification.submitter.username.as_ref().map_or_else(
        || "yok (username yok)".to_string(),
        |username| format!("@{}", html_escape::encode_text(username)),
    );

    format!(
        "{header}\n\nAd: {name}\nUsername: {username_display}\nID: {id}\n{contact_line}\n\nTXID:\n<code>{txid}</code>",
        name = html_escape::encode_text(&notification.submitter.name),
        id = notification.submitter.id,
        txid = html_escape::encode_text(&notification.txid),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::Submitter;

    fn notification(contact: ContactMethod) -> Notification {
        Notification {
            submitter: Submitter {
                id: 424_242,
                name: "Ada Lovelace".to_string(),
                username: Some("ada".to_string()),
            },
            contact,
            txid: "0xabc123".to_string(),
        }
    }

    #[test]
    fn test_render_typed_handle() {
        let text = render_notification(&notification(ContactMethod::Handle(
            "@contact_me".to_string(),
        )));

        assert!(text.starts_with("✅ KULLANICI BİLGİSİ (USERNAME) GELDİ"));
        assert!(text.contains("Ad: Ada Lovelace"));
        assert!(text.contains("Username: @ada"));
        assert!(text.contains("ID: 424242"));
        assert!(text.contains("Username (yazdı): @contact_me"));
        assert!(text.contains("TXID:\n<code>0xabc123</code>"));
    }

    #[test]
    fn test_render_typed_phone() {
        let text = render_notification(&notification(ContactMethod::TypedPhone(
            "+15551234567".to_string(),
        )));

        assert!(text.starts_with("📞 TELEFON BİLGİSİ GELDİ"));
        assert!(text.contains("Telefon (yazdı): +15551234567"));
    }

    #[test]
    fn test_render_shared_phone() {
        let text = render_notification(&notification(ContactMethod::SharedPhone(
            "+905551112233".to_string(),
        )));

        assert!(text.contains("Telefon: +905551112233"));
        assert!(!text.contains("yazdı"));
    }

    #[test]
    fn test_render_escapes_user_sourced_fields() {
        let mut notification = notification(ContactMethod::Handle("@<b>bold</b>".to_string()));
        notification.submitter.name = "Evil <script> & Co".to_string();
        notification.submitter.username = None;

        let text = render_notification(&notification);

        assert!(text.contains("Ad: Evil &lt;script&gt; &amp; Co"));
        assert!(text.contains("Username: yok (username yok)"));
        assert!(text.contains("Username (yazdı): @&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!text.contains("<script>"));
    }
}
