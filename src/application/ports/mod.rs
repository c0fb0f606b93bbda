//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod backend;
pub mod capability;
pub mod config;
pub mod probe;
pub mod profiler;

// Re-export common types
pub use backend::{BackendError, ClipboardBackend};
pub use capability::{always_headless, always_interactive, HeadlessPredicate};
pub use config::ConfigStore;
pub use probe::{PlatformProbe, ProbeResult};
pub use profiler::{PhaseProfiler, PhaseStats};
