//! Small text helpers shared by the handlers and the notifier.

use unicode_segmentation::UnicodeSegmentation;

/// Safely truncates a string to a maximum number of grapheme clusters.
///
/// This is UTF-8 safe and will not split multi-codepoint clusters such as
/// flag emoji or combining accents. Used to keep user-supplied text (long
/// transaction ids in particular) from flooding the logs.
///
/// # Examples
///
/// ```
/// use txgate::utils::truncate_str;
/// let s = "Привет, мир!";
/// assert_eq!(truncate_str(s, 6), "Привет");
/// ```
pub fn truncate_str(s: impl AsRef<str>, max_chars: usize) -> String {
    let s = s.as_ref();
    s.grapheme_indices(true)
        .nth(max_chars)
        .map_or_else(|| s.to_string(), |(pos, _)| s[..pos].to_string())
}
