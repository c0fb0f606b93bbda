//! Clipboard backend port interface

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the underlying clipboard primitive
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("Clipboard backend unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to read clipboard: {0}")]
    ReadFailed(String),

    #[error("Failed to write clipboard: {0}")]
    WriteFailed(String),
}

/// Port for the platform's clipboard read/write primitive.
///
/// Substitutable for tests: an injected backend bypasses platform
/// initialization entirely (see `BackendFacade::with_backend`).
#[async_trait]
pub trait ClipboardBackend: Send + Sync {
    /// Read the clipboard as text.
    ///
    /// An empty clipboard reads as `Ok("")`, not an error.
    async fn read(&self) -> Result<String, BackendError>;

    /// Write text to the clipboard, replacing its contents.
    async fn write(&self, text: &str) -> Result<(), BackendError>;
}

/// Blanket implementation for boxed backend types
#[async_trait]
impl ClipboardBackend for Box<dyn ClipboardBackend> {
    async fn read(&self) -> Result<String, BackendError> {
        self.as_ref().read().await
    }

    async fn write(&self, text: &str) -> Result<(), BackendError> {
        self.as_ref().write(text).await
    }
}
