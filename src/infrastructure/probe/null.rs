//! Null platform probe
//!
//! Used on Linux and other platforms without an out-of-band clipboard
//! helper. Detection is always inconclusive and image write is
//! unsupported; image read has no OS-level fallback beyond the base64
//! data-URL path.

use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{PlatformProbe, ProbeResult};
use crate::domain::image::ImagePayload;

/// Probe that never concludes anything
pub struct NullProbe;

impl NullProbe {
    /// Create a new null probe
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformProbe for NullProbe {
    async fn detect(&self) -> Option<ProbeResult> {
        None
    }

    async fn extract_image(&self) -> Option<ImagePayload> {
        None
    }

    async fn write_image(&self, _path: &Path) -> bool {
        false
    }

    fn supports_image_write(&self) -> bool {
        false
    }
}
