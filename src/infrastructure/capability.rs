//! Headless environment detection
//!
//! Environment variables are read here at the application boundary only;
//! the core receives an opaque predicate.

use std::env;
use std::sync::Arc;

use crate::application::ports::HeadlessPredicate;

/// Whether the current process has no interactive clipboard access.
///
/// - `CLIPGATE_HEADLESS` forces headless behavior anywhere.
/// - `CI` marks automated execution on any platform.
/// - On Linux, a missing display server means no clipboard.
pub fn detect_headless() -> bool {
    if env::var_os("CLIPGATE_HEADLESS").is_some() {
        return true;
    }
    if env::var_os("CI").is_some() {
        return true;
    }

    #[cfg(target_os = "linux")]
    {
        if env::var_os("DISPLAY").is_none() && env::var_os("WAYLAND_DISPLAY").is_none() {
            return true;
        }
    }

    false
}

/// Default headless predicate for manager construction.
///
/// The injection exclusion is handled by the manager itself (it knows
/// whether a test backend is present), so the flag is ignored here.
pub fn headless_predicate() -> HeadlessPredicate {
    Arc::new(|_exclude_when_injected| detect_headless())
}
