//! Clipboard content classification

use std::fmt;

use crate::domain::image::is_base64_image;

/// Fraction of NUL bytes above which content counts as binary (10%).
const NUL_THRESHOLD_PERCENT: usize = 10;
/// Fraction of non-printable control bytes above which content counts as binary (30%).
const CONTROL_THRESHOLD_PERCENT: usize = 30;

/// Kind of content currently held by the clipboard.
///
/// Always derived from the raw clipboard string via [`classify`],
/// never constructed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// Clipboard is empty (or whitespace only)
    Empty,
    /// Plain text
    Text,
    /// A base64 image data URL, or an image detected by a platform probe
    Image,
    /// Text dominated by NUL/control bytes, likely not human-readable
    Binary,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Empty => write!(f, "empty"),
            ContentType::Text => write!(f, "text"),
            ContentType::Image => write!(f, "image"),
            ContentType::Binary => write!(f, "binary"),
        }
    }
}

/// Classify raw clipboard text into a [`ContentType`].
///
/// Pure and deterministic: repeated calls on identical input yield
/// identical output, with no side effects.
pub fn classify(raw: &str) -> ContentType {
    if raw.trim().is_empty() {
        return ContentType::Empty;
    }

    if is_base64_image(raw) {
        return ContentType::Image;
    }

    if looks_binary(raw) {
        return ContentType::Binary;
    }

    ContentType::Text
}

/// Heuristic for content that is not human-readable text.
///
/// Counts NUL bytes and non-printable control bytes (C0 range excluding
/// tab/newline/carriage-return, plus DEL) across the whole string.
fn looks_binary(raw: &str) -> bool {
    let len = raw.len();
    if len == 0 {
        return false;
    }

    let mut nul_count = 0usize;
    let mut control_count = 0usize;
    for byte in raw.bytes() {
        match byte {
            0 => {
                nul_count += 1;
                control_count += 1;
            }
            b'\t' | b'\n' | b'\r' => {}
            0x01..=0x1f | 0x7f => control_count += 1,
            _ => {}
        }
    }

    nul_count * 100 > len * NUL_THRESHOLD_PERCENT
        || control_count * 100 > len * CONTROL_THRESHOLD_PERCENT
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8/5+hHgAHggJ/PchI7wAAAABJRU5ErkJggg==";

    #[test]
    fn empty_string_is_empty() {
        assert_eq!(classify(""), ContentType::Empty);
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(classify("   \n\t  "), ContentType::Empty);
    }

    #[test]
    fn plain_ascii_is_text() {
        assert_eq!(classify("plain ascii text"), ContentType::Text);
    }

    #[test]
    fn png_data_url_is_image() {
        assert_eq!(classify(PNG_DATA_URL), ContentType::Image);
    }

    #[test]
    fn data_url_with_surrounding_whitespace_is_image() {
        let padded = format!("  {}\n", PNG_DATA_URL);
        assert_eq!(classify(&padded), ContentType::Image);
    }

    #[test]
    fn uppercase_data_url_prefix_is_image() {
        assert_eq!(
            classify("DATA:IMAGE/PNG;BASE64,iVBORw0KGgo="),
            ContentType::Image
        );
    }

    #[test]
    fn non_image_data_url_is_not_image() {
        assert_eq!(
            classify("data:text/plain;base64,aGVsbG8="),
            ContentType::Text
        );
    }

    #[test]
    fn mostly_control_bytes_is_binary() {
        // >30% control bytes
        let raw = "\u{1}\u{2}\u{3}\u{4}ab";
        assert_eq!(classify(raw), ContentType::Binary);
    }

    #[test]
    fn nul_heavy_content_is_binary() {
        // 2 NULs in 12 bytes: 16% > 10% threshold
        let raw = "hello\0worl\0d";
        assert_eq!(classify(raw), ContentType::Binary);
    }

    #[test]
    fn tabs_and_newlines_do_not_count_as_control() {
        let raw = "a\tb\nc\rd\ne\tf";
        assert_eq!(classify(raw), ContentType::Text);
    }

    #[test]
    fn classify_is_idempotent() {
        let inputs = ["", "hello", PNG_DATA_URL, "\0\0\0ab"];
        for input in inputs {
            assert_eq!(classify(input), classify(input));
        }
    }
}
