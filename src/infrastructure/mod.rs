//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces: the arboard
//! backend, OS platform probes, the phase profiler, headless capability
//! detection, and the XDG config store.

pub mod backend;
pub mod capability;
pub mod config;
pub mod probe;
pub mod profiler;

// Re-export adapters
pub use backend::ArboardBackend;
pub use config::XdgConfigStore;
pub use probe::{create_probe, MacProbe, NullProbe, WindowsProbe};
pub use profiler::{InMemoryProfiler, NoopProfiler};

use std::sync::Arc;

use crate::application::facade::BackendFacade;
use crate::application::manager::ClipboardManager;
use crate::application::ports::{ConfigStore, PhaseProfiler};
use crate::domain::config::ClipboardConfig;
use crate::domain::error::ConfigError;
use crate::domain::snapshot::{CachePolicy, DisabledCachePolicy, TtlCachePolicy};

/// Create a clipboard manager wired with platform defaults: the lazy
/// arboard backend, the probe for the target OS, a TTL cache policy, an
/// in-memory profiler, and boundary headless detection.
pub fn create_manager(config: ClipboardConfig) -> ClipboardManager {
    let facade = BackendFacade::new(backend::backend_factory());
    let probe = probe::create_probe(&config);
    let policy: Box<dyn CachePolicy> = if config.cache_enabled {
        Box::new(TtlCachePolicy::new(config.cache_ttl))
    } else {
        Box::new(DisabledCachePolicy)
    };
    let profiler: Arc<dyn PhaseProfiler> = Arc::new(InMemoryProfiler::new(config.profiling));
    let headless = capability::headless_predicate();

    ClipboardManager::new(facade, probe, policy, profiler, headless, config)
}

/// Resolve configuration from a store with environment overrides applied
/// on top of the file values.
pub async fn load_config_from(store: &dyn ConfigStore) -> Result<ClipboardConfig, ConfigError> {
    let file = store.load().await?;
    Ok(file.merge(config::env_overrides()).resolve())
}

/// Resolve configuration from the default XDG config file and environment.
pub async fn load_config() -> Result<ClipboardConfig, ConfigError> {
    load_config_from(&XdgConfigStore::new()).await
}

/// Create a clipboard manager from the XDG config file and environment
/// overrides, with platform-default wiring.
pub async fn create_manager_from_env() -> Result<ClipboardManager, ConfigError> {
    Ok(create_manager(load_config().await?))
}
