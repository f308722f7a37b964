//! Configuration and settings management
//!
//! Loads settings from environment variables (optionally via a `.env`
//! file) and validates the administrator chat id.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use teloxide::types::ChatId;
use thiserror::Error;

/// Default time-to-live for a pending submission, in seconds (24 hours)
pub const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;
/// Default cap on concurrently pending submissions
pub const DEFAULT_SESSION_MAX_ENTRIES: u64 = 100_000;
/// Grapheme clusters of user text kept in log lines
pub const LOG_TEXT_PREVIEW_CHARS: usize = 64;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Loader failure: missing required key or unparseable value
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),
    /// `ADMIN_ID` is present but unusable as a destination chat
    #[error("ADMIN_ID must be a non-zero chat id, got {0}")]
    InvalidAdminId(i64),
}

/// Application settings loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Telegram Bot API token
    pub bot_token: String,

    /// Chat id that receives the admin notifications
    pub admin_id: i64,

    /// Seconds a pending transaction id stays stored
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Maximum number of concurrently pending submissions
    #[serde(default = "default_session_max_entries")]
    pub session_max_entries: u64,
}

const fn default_session_ttl_secs() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

const fn default_session_max_entries() -> u64 {
    DEFAULT_SESSION_MAX_ENTRIES
}

impl Settings {
    /// Create new settings by loading from environment and files
    ///
    /// `BOT_TOKEN` and `ADMIN_ID` are required; the session knobs fall
    /// back to their defaults.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use txgate::config::Settings;
    ///
    /// let settings = Settings::new().expect("Failed to load configuration");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] if a required key is missing, a value
    /// cannot be parsed, or `ADMIN_ID` is zero.
    pub fn new() -> Result<Self, SettingsError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(File::with_name("config/default").required(false))
            // Add in the current environment file
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked into git
            .add_source(File::with_name("config/local").required(false))
            // Note: Environment::default() auto-converts UPPER_SNAKE_CASE to snake_case
            // ignore_empty treats empty env vars as unset
            .add_source(Environment::default().ignore_empty(true))
            .build()?;

        let settings: Self = s.try_deserialize()?;

        if settings.admin_id == 0 {
            return Err(SettingsError::InvalidAdminId(settings.admin_id));
        }

        Ok(settings)
    }

    /// Destination chat for admin notifications
    #[must_use]
    pub fn admin_chat(&self) -> ChatId {
        ChatId(self.admin_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    // The single env-mutating test; keeping it alone avoids races with
    // parallel test threads.
    #[test]
    fn test_settings_env_loading() -> Result<(), Box<dyn std::error::Error>> {
        // 1. Required keys present, knobs at defaults
        env::set_var("BOT_TOKEN", "123456:dummy-token");
        env::set_var("ADMIN_ID", "424242");

        let settings = Settings::new()?;
        assert_eq!(settings.bot_token, "123456:dummy-token");
        assert_eq!(settings.admin_id, 424_242);
        assert_eq!(settings.session_ttl_secs, DEFAULT_SESSION_TTL_SECS);
        assert_eq!(settings.session_max_entries, DEFAULT_SESSION_MAX_ENTRIES);
        assert_eq!(settings.admin_chat(), ChatId(424_242));

        // 2. Session knobs picked up from the environment
        env::set_var("SESSION_TTL_SECS", "60");
        env::set_var("SESSION_MAX_ENTRIES", "42");

        let settings = Settings::new()?;
        assert_eq!(settings.session_ttl_secs, 60);
        assert_eq!(settings.session_max_entries, 42);

        env::remove_var("SESSION_TTL_SECS");
        env::remove_var("SESSION_MAX_ENTRIES");

        // 3. Zero admin id is rejected
        env::set_var("ADMIN_ID", "0");
        let err = Settings::new().err().ok_or("zero admin id must fail")?;
        assert!(matches!(err, SettingsError::InvalidAdminId(0)));

        env::remove_var("BOT_TOKEN");
        env::remove_var("ADMIN_ID");
        Ok(())
    }

    #[test]
    fn test_negative_admin_id_is_a_valid_chat() {
        // Group chats have negative ids; only zero is rejected.
        let settings = Settings {
            bot_token: "dummy".to_string(),
            admin_id: -1_001_234,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            session_max_entries: DEFAULT_SESSION_MAX_ENTRIES,
        };
        assert_eq!(settings.admin_chat(), ChatId(-1_001_234));
    }
}
