//! Clipgate - resilient cross-platform clipboard access layer
//!
//! Provides asynchronous access to the operating system clipboard: reading and
//! writing text, classifying content (empty/text/image/binary), and extracting
//! or injecting image bytes when the primary backend cannot represent images
//! natively.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Content classifier, image codec, snapshot cache,
//!   configuration model, and errors
//! - **Application**: Port interfaces (traits), the lazily-initialized backend
//!   facade, and the [`ClipboardManager`] orchestration
//! - **Infrastructure**: Adapter implementations (arboard backend, OS probes,
//!   phase profiler, capability detection, XDG config store)

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::manager::ClipboardManager;
pub use application::ports::{PhaseStats, ProbeResult};
pub use domain::config::ClipboardConfig;
pub use domain::content::ContentType;
pub use domain::error::ClipboardError;
pub use domain::image::ImagePayload;
pub use infrastructure::{create_manager, create_manager_from_env, load_config};
