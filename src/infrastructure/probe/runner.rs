//! Shared probe subprocess execution

use std::io::Write;
use std::process::{Output, Stdio};
use std::time::Duration;

use tempfile::NamedTempFile;
use tokio::process::Command;
use tokio::time::timeout;

use crate::domain::error::ProbeError;

/// Run a probe command with a hard timeout.
///
/// The child is spawned with `kill_on_drop`, so a timeout forcibly
/// terminates the process instead of hanging the caller.
pub(crate) async fn run_probe(
    mut cmd: Command,
    phase: &'static str,
    limit: Duration,
) -> Result<Output, ProbeError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = cmd.spawn().map_err(|e| ProbeError::Failed {
        phase,
        message: format!("failed to spawn: {}", e),
    })?;

    match timeout(limit, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(ProbeError::Failed {
            phase,
            message: e.to_string(),
        }),
        Err(_) => Err(ProbeError::Timeout { phase, limit }),
    }
}

/// Trimmed stdout of a probe process.
pub(crate) fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Write a probe script to a temp file with the given suffix.
///
/// The returned handle deletes the file on drop, which covers every exit
/// path - success, failure, or timeout.
pub(crate) fn write_script(
    contents: &str,
    suffix: &str,
    phase: &'static str,
) -> Result<NamedTempFile, ProbeError> {
    let mut file = tempfile::Builder::new()
        .prefix("clipgate-probe-")
        .suffix(suffix)
        .tempfile()
        .map_err(|e| ProbeError::Failed {
            phase,
            message: format!("failed to create temp script: {}", e),
        })?;

    file.write_all(contents.as_bytes())
        .map_err(|e| ProbeError::Failed {
            phase,
            message: format!("failed to write temp script: {}", e),
        })?;

    Ok(file)
}

/// Create a temp file to receive extracted image bytes.
pub(crate) fn image_temp_file(
    suffix: &str,
    phase: &'static str,
) -> Result<NamedTempFile, ProbeError> {
    tempfile::Builder::new()
        .prefix("clipgate-image-")
        .suffix(suffix)
        .tempfile()
        .map_err(|e| ProbeError::Failed {
            phase,
            message: format!("failed to create temp image file: {}", e),
        })
}
