//! Input classification for inbound user text.
//!
//! Classification is an ordered list of pattern predicates; the first match
//! wins. This module uses the `lazy-regex` crate so every pattern is
//! validated at compile time and initialized on first use.

// lazy_regex! expands to once_cell-backed statics.
#![allow(clippy::non_std_lazy_statics)]

use lazy_regex::lazy_regex;

/// ETH/BSC style id: `0x` followed by exactly 64 hex characters.
static RE_TXID_HEX: lazy_regex::Lazy<regex::Regex> = lazy_regex!(r"^0x[0-9a-fA-F]{64}$");

/// TRON style id: 60-100 alphanumeric characters, no prefix.
static RE_TXID_ALNUM: lazy_regex::Lazy<regex::Regex> = lazy_regex!(r"^[A-Za-z0-9]{60,100}$");

/// Exchange/internal transfer ids: 20-200 characters of a wider charset.
/// Subject to the exclusion guards in `is_loose_txid`.
static RE_TXID_LOOSE: lazy_regex::Lazy<regex::Regex> = lazy_regex!(r"^[A-Za-z0-9:_-]{20,200}$");

/// Phone-shaped prefix: optional `+`, then a digit.
static RE_PHONE_PREFIX: lazy_regex::Lazy<regex::Regex> = lazy_regex!(r"^\+?[0-9]");

/// Phone shape: optional `+`, digits with spaces/hyphens as separators.
static RE_PHONE: lazy_regex::Lazy<regex::Regex> = lazy_regex!(r"^\+?[0-9][0-9 \-]*$");

const PHONE_MIN_DIGITS: usize = 8;
const PHONE_MAX_DIGITS: usize = 16;
const HANDLE_MIN_CHARS: usize = 3;

/// What a trimmed inbound text turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// A transaction identifier, kept verbatim (trimmed).
    Txid(String),
    /// A messenger handle, `@`-prefixed, kept verbatim.
    Handle(String),
    /// A phone number, normalized via [`normalize_phone`].
    Phone(String),
    /// Anything else, including empty input and bot commands.
    Other,
}

/// Classifies raw message text into exactly one [`InputKind`].
///
/// Predicate order: strict transaction ids, permissive transaction ids,
/// handles, phone numbers, then [`InputKind::Other`]. The permissive id
/// rule carries exclusion guards so handles, phone-shaped strings and
/// `/`-prefixed commands never classify as ids.
#[must_use]
pub fn classify(text: &str) -> InputKind {
    let text = text.trim();

    if RE_TXID_HEX.is_match(text) || RE_TXID_ALNUM.is_match(text) || is_loose_txid(text) {
        return InputKind::Txid(text.to_string());
    }

    if text.starts_with('@') && text.chars().count() >= HANDLE_MIN_CHARS {
        return InputKind::Handle(text.to_string());
    }

    if is_phone(text) {
        return InputKind::Phone(normalize_phone(text));
    }

    InputKind::Other
}

fn is_loose_txid(text: &str) -> bool {
    RE_TXID_LOOSE.is_match(text)
        && !text.starts_with('@')
        && !text.starts_with('/')
        && !RE_PHONE_PREFIX.is_match(text)
}

fn is_phone(text: &str) -> bool {
    if !RE_PHONE.is_match(text) {
        return false;
    }
    let digits = text.chars().filter(char::is_ascii_digit).count();
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
}

/// Strips separator characters from a typed phone number.
///
/// A leading `+` is preserved; spaces and hyphens are removed.
///
/// # Examples
///
/// ```
/// use txgate::classify::normalize_phone;
/// assert_eq!(normalize_phone("+1 555-123-4567"), "+15551234567");
/// ```
#[must_use]
pub fn normalize_phone(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_txid() -> String {
        format!("0x{}", "a1B2c3D4".repeat(8))
    }

    #[test]
    fn test_hex_txid_classified() {
        assert_eq!(classify(&hex_txid()), InputKind::Txid(hex_txid()));
    }

    #[test]
    fn test_hex_txid_surrounding_whitespace_trimmed() {
        let padded = format!("  {}\n", hex_txid());
        assert_eq!(classify(&padded), InputKind::Txid(hex_txid()));
    }

    #[test]
    fn test_short_hex_is_not_txid() {
        // 0x + 30 hex chars: too short for the strict rule, digit-prefixed
        // so the permissive rule rejects it too.
        let short = format!("0x{}", "ab12cd34ef".repeat(3));
        assert_eq!(classify(&short), InputKind::Other);
    }

    #[test]
    fn test_tron_style_txid_classified() {
        let txid = "a1B2".repeat(16); // 64 alphanumeric chars
        assert_eq!(classify(&txid), InputKind::Txid(txid));
    }

    #[test]
    fn test_loose_txid_classified() {
        let txid = "internal:transfer_12";
        assert_eq!(classify(txid), InputKind::Txid(txid.to_string()));

        let txid = "order:2024:refund:9981";
        assert_eq!(classify(txid), InputKind::Txid(txid.to_string()));
    }

    #[test]
    fn test_loose_txid_rejects_digit_prefix() {
        // Looks like an id by charset and length, but phone-shaped prefix.
        let digits = "1".repeat(25);
        assert_eq!(classify(&digits), InputKind::Other);
    }

    #[test]
    fn test_loose_txid_rejects_too_short() {
        // 19 characters, one short of the permissive minimum.
        assert_eq!(classify("ref:abcdefghij12345"), InputKind::Other);
        assert_eq!(classify("ref:a1"), InputKind::Other);
    }

    #[test]
    fn test_handle_classified() {
        assert_eq!(
            classify("@alice"),
            InputKind::Handle("@alice".to_string())
        );
        assert_eq!(classify("@ab"), InputKind::Handle("@ab".to_string()));
    }

    #[test]
    fn test_handle_too_short_is_other() {
        assert_eq!(classify("@a"), InputKind::Other);
        assert_eq!(classify("@"), InputKind::Other);
    }

    #[test]
    fn test_long_handle_is_never_txid() {
        // Satisfies the permissive length/charset apart from the prefix.
        let handle = format!("@{}", "user_name_2024".repeat(2));
        assert_eq!(classify(&handle), InputKind::Handle(handle.clone()));
    }

    #[test]
    fn test_phone_classified_and_normalized() {
        assert_eq!(
            classify("+15551234567"),
            InputKind::Phone("+15551234567".to_string())
        );
        assert_eq!(
            classify("+1 555-123-4567"),
            InputKind::Phone("+15551234567".to_string())
        );
        assert_eq!(
            classify("8 916 123-45-67"),
            InputKind::Phone("89161234567".to_string())
        );
    }

    #[test]
    fn test_phone_digit_count_bounds() {
        // 3 digits: too short.
        assert_eq!(classify("+123"), InputKind::Other);
        // 17 digits: too long for a phone, too short for a permissive id.
        assert_eq!(classify("12345678901234567"), InputKind::Other);
    }

    #[test]
    fn test_command_is_other() {
        assert_eq!(classify("/start"), InputKind::Other);
        assert_eq!(classify("/start_with_a_long_suffix"), InputKind::Other);
    }

    #[test]
    fn test_noise_is_other() {
        assert_eq!(classify(""), InputKind::Other);
        assert_eq!(classify("   "), InputKind::Other);
        assert_eq!(classify("hello there"), InputKind::Other);
        assert_eq!(classify("when will I be added?"), InputKind::Other);
    }

    #[test]
    fn test_normalize_phone_keeps_plus() {
        assert_eq!(normalize_phone("+44 20 7946-0958"), "+442079460958");
        assert_eq!(normalize_phone("89161234567"), "89161234567");
    }
}
