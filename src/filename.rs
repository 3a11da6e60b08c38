//! Download-name derivation: pure string functions, no network or I/O.
//!
//! The server suggests a name via `Content-Disposition: attachment;
//! filename="…"`. When the header is missing the client falls back to the
//! original filename with its extension swapped for the target one. Both
//! rules live here, isolated, so they are unit-testable independently of
//! the HTTP layer.

use once_cell::sync::Lazy;
use regex::Regex;

/// First double-quoted `filename` token in a `Content-Disposition` value.
///
/// Greedy inside the quotes, matching names that themselves contain
/// escaped-looking characters the way the service actually emits them.
static RE_DISPOSITION_FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"filename="(.+)""#).unwrap());

/// Extract the suggested filename from a `Content-Disposition` header value.
///
/// Returns `None` when the value carries no quoted `filename` token.
///
/// ```rust
/// use doc2pdf_client::filename::from_content_disposition;
///
/// assert_eq!(
///     from_content_disposition(r#"attachment; filename="result.pdf""#),
///     Some("result.pdf".to_string())
/// );
/// assert_eq!(from_content_disposition("inline"), None);
/// ```
pub fn from_content_disposition(value: &str) -> Option<String> {
    RE_DISPOSITION_FILENAME
        .captures(value)
        .map(|caps| caps[1].to_string())
}

/// Swap the final extension of `original` for `ext`.
///
/// Only the text after the last dot in the last path component is treated
/// as an extension; a name with no dot gets `ext` appended. Matches the
/// service's own output-name rule, so the fallback agrees with what the
/// server would have suggested.
pub fn with_target_extension(original: &str, ext: &str) -> String {
    let ext = ext.trim_start_matches('.');
    let stem = match original.rfind('.') {
        // A dot before the last path separator is not an extension dot.
        Some(idx) if !original[idx..].contains('/') && !original[idx..].contains('\\') => {
            &original[..idx]
        }
        _ => original,
    };
    format!("{stem}.{ext}")
}

/// Derive the download name for a converted artifact.
///
/// * Header present with a quoted token → that token, exactly.
/// * Header present without a token → `converted.{ext}`.
/// * No header → `original` stem + `.{ext}`.
pub fn download_name(disposition: Option<&str>, original: &str, ext: &str) -> String {
    match disposition {
        Some(value) => from_content_disposition(value)
            .unwrap_or_else(|| format!("converted.{}", ext.trim_start_matches('.'))),
        None => with_target_extension(original, ext),
    }
}
