//! Platform probe adapters
//!
//! Short-lived OS scripting processes (PowerShell on Windows, AppleScript
//! on macOS) that inspect or mutate the OS clipboard when the primary
//! backend is inconclusive or cannot handle images. Linux has no probe;
//! the null variant always answers inconclusively.

mod macos;
mod null;
mod runner;
mod windows;

pub use macos::MacProbe;
pub use null::NullProbe;
pub use windows::WindowsProbe;

use crate::application::ports::PlatformProbe;
use crate::domain::config::ClipboardConfig;

/// Create the probe for the target OS.
///
/// Selected once at construction; no platform branching happens inside
/// clipboard operations.
pub fn create_probe(config: &ClipboardConfig) -> Box<dyn PlatformProbe> {
    #[cfg(target_os = "windows")]
    {
        Box::new(WindowsProbe::new(
            config.detect_timeout,
            config.image_timeout,
        ))
    }

    #[cfg(target_os = "macos")]
    {
        Box::new(MacProbe::new(config.detect_timeout, config.image_timeout))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let _ = config;
        Box::new(NullProbe::new())
    }
}
