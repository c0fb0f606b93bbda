//! Platform probe port interface

use std::fmt;
use std::path::Path;

use async_trait::async_trait;

use crate::domain::image::ImagePayload;

/// Outcome of a probe's content-type detection.
///
/// `None` at the call site (an inconclusive probe) means "defer to the
/// caller's other signal" - probes never surface errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    /// The clipboard holds an image format
    Image,
    /// The clipboard holds text
    Text,
    /// The clipboard is empty
    Empty,
    /// The clipboard holds a format the probe does not recognize
    Unknown,
}

impl ProbeResult {
    /// Parse a probe script's stdout token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "image" => Some(ProbeResult::Image),
            "text" => Some(ProbeResult::Text),
            "empty" => Some(ProbeResult::Empty),
            "unknown" => Some(ProbeResult::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeResult::Image => write!(f, "image"),
            ProbeResult::Text => write!(f, "text"),
            ProbeResult::Empty => write!(f, "empty"),
            ProbeResult::Unknown => write!(f, "unknown"),
        }
    }
}

/// Port for OS-specific out-of-band clipboard helpers.
///
/// Probes spawn short-lived native scripting processes to disambiguate
/// content the primary backend cannot represent, and to move image bytes
/// in and out of the OS clipboard. Every operation is bounded by a hard
/// timeout and resolves to an inconclusive value (`None`/`false`) on
/// failure rather than erroring or hanging the caller. Detection never
/// mutates the clipboard.
#[async_trait]
pub trait PlatformProbe: Send + Sync {
    /// Inspect the OS clipboard's native data formats.
    async fn detect(&self) -> Option<ProbeResult>;

    /// Serialize the clipboard image (if any) to bytes.
    async fn extract_image(&self) -> Option<ImagePayload>;

    /// Place the image file at `path` onto the OS clipboard.
    async fn write_image(&self, path: &Path) -> bool;

    /// Whether this platform can inject images at all.
    fn supports_image_write(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stdout_tokens() {
        assert_eq!(ProbeResult::from_token("image"), Some(ProbeResult::Image));
        assert_eq!(ProbeResult::from_token(" TEXT \n"), Some(ProbeResult::Text));
        assert_eq!(ProbeResult::from_token("empty"), Some(ProbeResult::Empty));
        assert_eq!(
            ProbeResult::from_token("unknown"),
            Some(ProbeResult::Unknown)
        );
        assert_eq!(ProbeResult::from_token("garbage"), None);
        assert_eq!(ProbeResult::from_token(""), None);
    }

    #[test]
    fn displays_lowercase_tokens() {
        assert_eq!(ProbeResult::Image.to_string(), "image");
        assert_eq!(ProbeResult::Unknown.to_string(), "unknown");
    }
}
