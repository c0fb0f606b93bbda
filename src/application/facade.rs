//! Lazily-initialized clipboard backend facade

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::application::ports::{BackendError, ClipboardBackend};

/// Async factory producing the platform backend on first use.
pub type BackendFactory = Box<
    dyn Fn() -> Pin<Box<dyn Future<Output = Result<Arc<dyn ClipboardBackend>, BackendError>> + Send>>
        + Send
        + Sync,
>;

/// Facade over the platform clipboard primitive.
///
/// Initialization runs at most once per facade: a single shared
/// initialization future is reused across all calls, including concurrent
/// ones, so the backend is never loaded twice. Test code can inject a
/// backend directly, bypassing initialization entirely.
pub struct BackendFacade {
    cell: OnceCell<Arc<dyn ClipboardBackend>>,
    factory: Option<BackendFactory>,
    injected: bool,
}

impl BackendFacade {
    /// Create a facade that initializes lazily through `factory`.
    pub fn new(factory: BackendFactory) -> Self {
        Self {
            cell: OnceCell::new(),
            factory: Some(factory),
            injected: false,
        }
    }

    /// Create a facade around an already-constructed backend.
    ///
    /// No initialization happens; the facade reports itself as injected so
    /// the headless guard lets operations through to the test backend.
    pub fn with_backend(backend: Arc<dyn ClipboardBackend>) -> Self {
        Self {
            cell: OnceCell::new_with(Some(backend)),
            factory: None,
            injected: true,
        }
    }

    /// Whether a test backend was injected at construction.
    pub fn is_injected(&self) -> bool {
        self.injected
    }

    async fn backend(&self) -> Result<&Arc<dyn ClipboardBackend>, BackendError> {
        self.cell
            .get_or_try_init(|| async {
                match &self.factory {
                    Some(factory) => factory().await,
                    None => Err(BackendError::Unavailable(
                        "no backend factory configured".to_string(),
                    )),
                }
            })
            .await
    }

    /// Read the clipboard as text, initializing the backend if needed.
    pub async fn read(&self) -> Result<String, BackendError> {
        self.backend().await?.read().await
    }

    /// Write text to the clipboard, initializing the backend if needed.
    pub async fn write(&self, text: &str) -> Result<(), BackendError> {
        self.backend().await?.write(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticBackend(&'static str);

    #[async_trait]
    impl ClipboardBackend for StaticBackend {
        async fn read(&self) -> Result<String, BackendError> {
            Ok(self.0.to_string())
        }

        async fn write(&self, _text: &str) -> Result<(), BackendError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn injected_backend_bypasses_factory() {
        let facade = BackendFacade::with_backend(Arc::new(StaticBackend("hello")));
        assert!(facade.is_injected());
        assert_eq!(facade.read().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn factory_runs_at_most_once() {
        static INITS: AtomicUsize = AtomicUsize::new(0);

        let facade = Arc::new(BackendFacade::new(Box::new(|| {
            Box::pin(async {
                INITS.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(StaticBackend("once")) as Arc<dyn ClipboardBackend>)
            })
        })));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let facade = Arc::clone(&facade);
            handles.push(tokio::spawn(async move { facade.read().await.unwrap() }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), "once");
        }
        assert_eq!(INITS.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_init_surfaces_unavailable() {
        let facade = BackendFacade::new(Box::new(|| {
            Box::pin(async { Err(BackendError::Unavailable("no display".to_string())) })
        }));
        let err = facade.read().await.unwrap_err();
        assert!(matches!(err, BackendError::Unavailable(_)));
    }
}
