//! macOS clipboard probe using osascript
//!
//! Detection parses `clipboard info` output for known pasteboard format
//! tokens. Image extraction tries a sequence of format coercions against
//! the clipboard, writing the first success to a temp file. Scripts receive
//! file paths via `on run argv`, never through text interpolation.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{PlatformProbe, ProbeResult};
use crate::domain::error::ProbeError;
use crate::domain::image::ImagePayload;

use super::runner::{image_temp_file, run_probe, stdout_text, write_script};

/// Pasteboard tokens that mean an image is on the clipboard.
const IMAGE_TOKENS: &[&str] = &["picture", "PNGf", "JPEG", "TIFF", "GIFf", "BMPf"];

/// Pasteboard tokens that mean plain text.
const TEXT_TOKENS: &[&str] = &["string", "utf8", "text"];

/// Coercion order for image extraction: `(format tag, AppleScript class)`.
/// The class token is a fixed constant, so substituting it into the script
/// body is safe; only file paths must go through argv.
const COERCIONS: &[(&str, &str)] = &[
    ("png", "\u{ab}class PNGf\u{bb}"),
    ("jpeg", "JPEG picture"),
    ("gif", "GIF picture"),
    ("tiff", "TIFF picture"),
    ("bmp", "\u{ab}class BMPf\u{bb}"),
];

/// Classify `clipboard info` output.
pub(crate) fn parse_clipboard_info(info: &str) -> Option<ProbeResult> {
    let trimmed = info.trim();
    if trimmed.is_empty() {
        return Some(ProbeResult::Empty);
    }
    if IMAGE_TOKENS.iter().any(|token| trimmed.contains(token)) {
        return Some(ProbeResult::Image);
    }
    let lower = trimmed.to_lowercase();
    if TEXT_TOKENS.iter().any(|token| lower.contains(token)) {
        return Some(ProbeResult::Text);
    }
    Some(ProbeResult::Unknown)
}

/// Script that coerces the clipboard to one image class and writes the
/// bytes to the file named by the first argument.
fn coercion_script(class_token: &str) -> String {
    format!(
        r#"on run argv
    set outFile to POSIX file (item 1 of argv)
    set imgData to the clipboard as {class_token}
    set fileRef to open for access outFile with write permission
    try
        set eof of fileRef to 0
        write imgData to fileRef
    on error errMsg
        close access fileRef
        error errMsg
    end try
    close access fileRef
end run"#
    )
}

/// Script that reads an image file and places it onto the clipboard.
fn inject_script(class_token: &str) -> String {
    format!(
        r#"on run argv
    set imgFile to POSIX file (item 1 of argv)
    set the clipboard to (read imgFile as {class_token})
end run"#
    )
}

/// AppleScript class for an image file, chosen by extension.
fn class_for_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "JPEG picture",
        "gif" => "GIF picture",
        "tif" | "tiff" => "TIFF picture",
        "bmp" => "\u{ab}class BMPf\u{bb}",
        _ => "\u{ab}class PNGf\u{bb}",
    }
}

/// macOS platform probe
pub struct MacProbe {
    detect_timeout: Duration,
    image_timeout: Duration,
}

impl MacProbe {
    pub fn new(detect_timeout: Duration, image_timeout: Duration) -> Self {
        Self {
            detect_timeout,
            image_timeout,
        }
    }

    async fn detect_inner(&self) -> Result<Option<ProbeResult>, ProbeError> {
        let mut cmd = Command::new("osascript");
        cmd.arg("-e").arg("clipboard info");
        let output = run_probe(cmd, "mac-detect", self.detect_timeout).await?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                phase: "mac-detect",
                message: format!("exit status {}", output.status),
            });
        }

        Ok(parse_clipboard_info(&stdout_text(&output)))
    }

    async fn extract_inner(&self) -> Result<Option<ImagePayload>, ProbeError> {
        for (format, class_token) in COERCIONS {
            let script = write_script(&coercion_script(class_token), ".applescript", "mac-extract")?;
            let suffix = format!(".{}", format);
            let image = image_temp_file(&suffix, "mac-extract")?;

            let mut cmd = Command::new("osascript");
            cmd.arg(script.path()).arg(image.path());
            let output = run_probe(cmd, "mac-extract", self.image_timeout).await?;

            // A failed coercion just means the clipboard doesn't hold this
            // format; move on to the next one.
            if !output.status.success() {
                continue;
            }

            let data = tokio::fs::read(image.path())
                .await
                .map_err(|e| ProbeError::Failed {
                    phase: "mac-extract",
                    message: format!("failed to read temp image: {}", e),
                })?;
            if data.is_empty() {
                continue;
            }

            return Ok(Some(ImagePayload {
                format: format.to_string(),
                data,
            }));
        }

        Ok(None)
    }

    async fn write_inner(&self, path: &Path) -> Result<bool, ProbeError> {
        let class_token = class_for_extension(path);
        let script = write_script(&inject_script(class_token), ".applescript", "mac-write")?;

        let mut cmd = Command::new("osascript");
        cmd.arg(script.path()).arg(path);
        let output = run_probe(cmd, "mac-write", self.image_timeout).await?;

        Ok(output.status.success())
    }
}

#[async_trait]
impl PlatformProbe for MacProbe {
    async fn detect(&self) -> Option<ProbeResult> {
        match self.detect_inner().await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(error = %err, "mac clipboard detection probe inconclusive");
                None
            }
        }
    }

    async fn extract_image(&self) -> Option<ImagePayload> {
        match self.extract_inner().await {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "mac image extraction probe inconclusive");
                None
            }
        }
    }

    async fn write_image(&self, path: &Path) -> bool {
        match self.write_inner(path).await {
            Ok(wrote) => wrote,
            Err(err) => {
                tracing::warn!(error = %err, "mac image write probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_info_means_empty_clipboard() {
        assert_eq!(parse_clipboard_info(""), Some(ProbeResult::Empty));
        assert_eq!(parse_clipboard_info("  \n"), Some(ProbeResult::Empty));
    }

    #[test]
    fn png_class_means_image() {
        let info = "\u{ab}class PNGf\u{bb}, 8432, \u{ab}class TIFF\u{bb}, 120932";
        assert_eq!(parse_clipboard_info(info), Some(ProbeResult::Image));
    }

    #[test]
    fn picture_token_means_image() {
        assert_eq!(
            parse_clipboard_info("JPEG picture, 4096"),
            Some(ProbeResult::Image)
        );
    }

    #[test]
    fn utf8_class_means_text() {
        let info = "\u{ab}class utf8\u{bb}, 42, string, 42";
        assert_eq!(parse_clipboard_info(info), Some(ProbeResult::Text));
    }

    #[test]
    fn unrecognized_formats_are_unknown() {
        assert_eq!(
            parse_clipboard_info("\u{ab}class furl\u{bb}, 120"),
            Some(ProbeResult::Unknown)
        );
    }

    #[test]
    fn class_chosen_by_extension() {
        assert_eq!(
            class_for_extension(Path::new("/tmp/a.jpg")),
            "JPEG picture"
        );
        assert_eq!(
            class_for_extension(Path::new("/tmp/a.png")),
            "\u{ab}class PNGf\u{bb}"
        );
        assert_eq!(
            class_for_extension(Path::new("/tmp/noext")),
            "\u{ab}class PNGf\u{bb}"
        );
    }

    #[test]
    fn scripts_take_paths_from_argv() {
        // Paths reach scripts as arguments, never via interpolation
        let script = coercion_script("\u{ab}class PNGf\u{bb}");
        assert!(script.contains("item 1 of argv"));
        let script = inject_script("JPEG picture");
        assert!(script.contains("item 1 of argv"));
    }
}
