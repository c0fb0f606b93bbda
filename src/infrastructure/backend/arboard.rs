//! Cross-platform clipboard backend using arboard
//!
//! Works on Windows, macOS, and Linux (X11/Wayland).

use async_trait::async_trait;

use crate::application::ports::{BackendError, ClipboardBackend};

/// Cross-platform clipboard backend using arboard
pub struct ArboardBackend;

impl ArboardBackend {
    /// Create a new arboard backend
    pub fn new() -> Self {
        Self
    }
}

impl Default for ArboardBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipboardBackend for ArboardBackend {
    async fn read(&self) -> Result<String, BackendError> {
        // arboard operations are blocking, so run in spawn_blocking.
        // Handles are not Sync, so a fresh one is opened per operation.
        tokio::task::spawn_blocking(|| {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| BackendError::Unavailable(e.to_string()))?;

            match clipboard.get_text() {
                Ok(text) => Ok(text),
                // An empty clipboard is a normal state, not a failure
                Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
                Err(e) => Err(BackendError::ReadFailed(e.to_string())),
            }
        })
        .await
        .map_err(|e| BackendError::ReadFailed(format!("Task join error: {}", e)))?
    }

    async fn write(&self, text: &str) -> Result<(), BackendError> {
        let text = text.to_owned();

        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| BackendError::Unavailable(e.to_string()))?;

            clipboard
                .set_text(&text)
                .map_err(|e| BackendError::WriteFailed(e.to_string()))
        })
        .await
        .map_err(|e| BackendError::WriteFailed(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_creates_successfully() {
        let _backend = ArboardBackend::new();
    }

    #[test]
    fn backend_default_creates() {
        let _backend = ArboardBackend::default();
    }
}
