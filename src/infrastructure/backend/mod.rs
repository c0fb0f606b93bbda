//! Clipboard backend adapters
//!
//! Provides the cross-platform arboard backend and the lazy factory the
//! backend facade uses to initialize it once per process.

mod arboard;

pub use self::arboard::ArboardBackend;

use std::sync::Arc;

use crate::application::facade::BackendFactory;
use crate::application::ports::{BackendError, ClipboardBackend};

/// Lazy factory for the default platform backend.
///
/// Verifies clipboard availability once (arboard handle construction can
/// fail on systems without a display server) before handing the backend to
/// the facade.
pub fn backend_factory() -> BackendFactory {
    Box::new(|| {
        Box::pin(async {
            tokio::task::spawn_blocking(|| {
                ::arboard::Clipboard::new()
                    .map(|_| ())
                    .map_err(|e| BackendError::Unavailable(e.to_string()))
            })
            .await
            .map_err(|e| BackendError::Unavailable(format!("Task join error: {}", e)))??;

            Ok(Arc::new(ArboardBackend::new()) as Arc<dyn ClipboardBackend>)
        })
    })
}
