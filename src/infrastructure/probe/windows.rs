//! Windows clipboard probe using PowerShell
//!
//! Inspects native clipboard data formats through
//! `System.Windows.Forms.Clipboard` and moves image bytes through temp PNG
//! files. File paths are passed to scripts as process arguments (`$args`),
//! never interpolated into script text.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{PlatformProbe, ProbeResult};
use crate::domain::error::ProbeError;
use crate::domain::image::ImagePayload;

use super::runner::{image_temp_file, run_probe, stdout_text, write_script};

const DETECT_SCRIPT: &str = r#"
Add-Type -AssemblyName System.Windows.Forms
$clip = [System.Windows.Forms.Clipboard]
if ($clip::ContainsImage()) {
    'image'
} elseif ($clip::ContainsText()) {
    if ([string]::IsNullOrEmpty($clip::GetText())) { 'empty' } else { 'text' }
} elseif ($clip::GetDataObject().GetFormats().Count -eq 0) {
    'empty'
} else {
    'unknown'
}
"#;

const EXTRACT_SCRIPT: &str = r#"
Add-Type -AssemblyName System.Windows.Forms
Add-Type -AssemblyName System.Drawing
$img = [System.Windows.Forms.Clipboard]::GetImage()
if ($null -eq $img) { exit 1 }
$img.Save($args[0], [System.Drawing.Imaging.ImageFormat]::Png)
'ok'
"#;

const WRITE_SCRIPT: &str = r#"
Add-Type -AssemblyName System.Windows.Forms
Add-Type -AssemblyName System.Drawing
$img = [System.Drawing.Image]::FromFile($args[0])
try {
    [System.Windows.Forms.Clipboard]::SetImage($img)
} finally {
    $img.Dispose()
}
'ok'
"#;

/// Windows platform probe
pub struct WindowsProbe {
    detect_timeout: Duration,
    image_timeout: Duration,
}

impl WindowsProbe {
    pub fn new(detect_timeout: Duration, image_timeout: Duration) -> Self {
        Self {
            detect_timeout,
            image_timeout,
        }
    }

    /// PowerShell invocation with a temp script file and extra arguments.
    /// `-STA` is required for `System.Windows.Forms.Clipboard`.
    fn powershell(script_path: &Path) -> Command {
        let mut cmd = Command::new("powershell");
        cmd.arg("-NoProfile")
            .arg("-STA")
            .arg("-ExecutionPolicy")
            .arg("Bypass")
            .arg("-File")
            .arg(script_path);
        cmd
    }

    async fn detect_inner(&self) -> Result<Option<ProbeResult>, ProbeError> {
        let script = write_script(DETECT_SCRIPT, ".ps1", "windows-detect")?;
        let output = run_probe(
            Self::powershell(script.path()),
            "windows-detect",
            self.detect_timeout,
        )
        .await?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                phase: "windows-detect",
                message: format!("exit status {}", output.status),
            });
        }

        Ok(ProbeResult::from_token(&stdout_text(&output)))
    }

    async fn extract_inner(&self) -> Result<Option<ImagePayload>, ProbeError> {
        let script = write_script(EXTRACT_SCRIPT, ".ps1", "windows-extract")?;
        let image = image_temp_file(".png", "windows-extract")?;

        let mut cmd = Self::powershell(script.path());
        cmd.arg(image.path());
        let output = run_probe(cmd, "windows-extract", self.image_timeout).await?;

        // exit 1 means no image on the clipboard, not a probe fault
        if !output.status.success() {
            return Ok(None);
        }

        let data = tokio::fs::read(image.path())
            .await
            .map_err(|e| ProbeError::Failed {
                phase: "windows-extract",
                message: format!("failed to read temp image: {}", e),
            })?;
        if data.is_empty() {
            return Ok(None);
        }

        Ok(Some(ImagePayload {
            format: "png".to_string(),
            data,
        }))
    }

    async fn write_inner(&self, path: &Path) -> Result<bool, ProbeError> {
        let script = write_script(WRITE_SCRIPT, ".ps1", "windows-write")?;

        let mut cmd = Self::powershell(script.path());
        cmd.arg(path);
        let output = run_probe(cmd, "windows-write", self.image_timeout).await?;

        Ok(output.status.success() && stdout_text(&output) == "ok")
    }
}

#[async_trait]
impl PlatformProbe for WindowsProbe {
    async fn detect(&self) -> Option<ProbeResult> {
        match self.detect_inner().await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(error = %err, "windows clipboard detection probe inconclusive");
                None
            }
        }
    }

    async fn extract_image(&self) -> Option<ImagePayload> {
        match self.extract_inner().await {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "windows image extraction probe inconclusive");
                None
            }
        }
    }

    async fn write_image(&self, path: &Path) -> bool {
        match self.write_inner(path).await {
            Ok(wrote) => wrote,
            Err(err) => {
                tracing::warn!(error = %err, "windows image write probe failed");
                false
            }
        }
    }
}
