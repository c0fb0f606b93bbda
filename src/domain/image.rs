//! Base64 image data-URL codec

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Mime subtypes recognized in `data:image/...` URLs.
const SUPPORTED_SUBTYPES: &[&str] = &["png", "jpeg", "jpg", "gif", "bmp", "webp", "svg+xml"];

/// Decoded image bytes with their format tag.
///
/// Produced only by [`parse_base64_image`] or a platform probe's image
/// extraction path; immutable once returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    /// Lowercase format tag (`png`, `jpeg`, `gif`, `bmp`, `webp`, `svg`)
    pub format: String,
    /// Raw image bytes
    pub data: Vec<u8>,
}

/// Lightweight pattern-only check for a base64 image data URL.
///
/// Matches the anchored `data:image/<subtype>;base64,<payload>` syntax
/// (case-insensitive, after trimming) without decoding the payload.
pub fn is_base64_image(raw: &str) -> bool {
    split_data_url(raw).is_some()
}

/// Parse a base64 image data URL into an [`ImagePayload`].
///
/// Returns `None` (never an error) on pattern mismatch, invalid base64
/// characters, decode failure, or a zero-length decoded buffer. Callers
/// treat `None` uniformly as "not a recognizable image".
pub fn parse_base64_image(raw: &str) -> Option<ImagePayload> {
    let (subtype, payload) = split_data_url(raw)?;

    if !payload
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
    {
        return None;
    }

    let data = BASE64.decode(payload).ok()?;
    if data.is_empty() {
        return None;
    }

    Some(ImagePayload {
        format: normalize_subtype(subtype),
        data,
    })
}

/// Split a trimmed data URL into `(subtype, payload)` if it matches the
/// anchored pattern with a supported subtype and non-empty payload.
fn split_data_url(raw: &str) -> Option<(&str, &str)> {
    let trimmed = raw.trim();
    let rest = strip_prefix_ignore_case(trimmed, "data:image/")?;
    let (subtype, rest) = rest.split_once(';')?;
    if !SUPPORTED_SUBTYPES
        .iter()
        .any(|s| subtype.eq_ignore_ascii_case(s))
    {
        return None;
    }
    let payload = strip_prefix_ignore_case(rest, "base64,")?;
    if payload.is_empty() {
        return None;
    }
    Some((subtype, payload))
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

/// Normalize a mime subtype into a stable file-extension-like tag.
fn normalize_subtype(subtype: &str) -> String {
    let lower = subtype.to_ascii_lowercase();
    match lower.as_str() {
        "jpg" => "jpeg".to_string(),
        "svg+xml" => "svg".to_string(),
        _ => lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8/5+hHgAHggJ/PchI7wAAAABJRU5ErkJggg==";

    #[test]
    fn parses_png_data_url() {
        let payload = parse_base64_image(PNG_DATA_URL).unwrap();
        assert_eq!(payload.format, "png");
        assert!(!payload.data.is_empty());
        // PNG magic bytes survive the round trip
        assert_eq!(&payload.data[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn round_trips_embedded_bytes_exactly() {
        use base64::Engine;
        let bytes = vec![0xde, 0xad, 0xbe, 0xef, 0x00, 0x01];
        let url = format!(
            "data:image/gif;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&bytes)
        );
        let payload = parse_base64_image(&url).unwrap();
        assert_eq!(payload.format, "gif");
        assert_eq!(payload.data, bytes);
    }

    #[test]
    fn normalizes_jpg_and_svg_subtypes() {
        let jpg = parse_base64_image("data:image/jpg;base64,aGVsbG8=").unwrap();
        assert_eq!(jpg.format, "jpeg");
        let svg = parse_base64_image("data:image/svg+xml;base64,aGVsbG8=").unwrap();
        assert_eq!(svg.format, "svg");
    }

    #[test]
    fn rejects_pattern_mismatch() {
        assert!(parse_base64_image("plain text").is_none());
        assert!(parse_base64_image("data:image/png;aGVsbG8=").is_none());
        assert!(parse_base64_image("data:audio/mp3;base64,aGVsbG8=").is_none());
        assert!(parse_base64_image("data:image/tiff;base64,aGVsbG8=").is_none());
    }

    #[test]
    fn rejects_invalid_base64_characters() {
        assert!(parse_base64_image("data:image/png;base64,not valid!").is_none());
        assert!(parse_base64_image("data:image/png;base64,abc\ndef").is_none());
    }

    #[test]
    fn rejects_empty_payload() {
        assert!(parse_base64_image("data:image/png;base64,").is_none());
    }

    #[test]
    fn rejects_corrupt_base64() {
        // Valid charset but invalid padding/length
        assert!(parse_base64_image("data:image/png;base64,abcde").is_none());
    }

    #[test]
    fn pattern_check_does_not_validate_payload() {
        // is_base64_image is pattern-only; the payload here is corrupt
        assert!(is_base64_image("data:image/png;base64,abcde"));
        assert!(!is_base64_image("data:image/png;base64,"));
    }
}
