//! Clipboard configuration model

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Partial configuration as loaded from a config file or environment
/// overrides. All fields are optional to support merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub cache_enabled: Option<bool>,
    pub cache_ttl_ms: Option<u64>,
    pub read_retries: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    pub detect_timeout_secs: Option<u64>,
    pub image_timeout_secs: Option<u64>,
    pub profiling: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        let resolved = ClipboardConfig::default();
        Self {
            cache_enabled: Some(resolved.cache_enabled),
            cache_ttl_ms: Some(resolved.cache_ttl.as_millis() as u64),
            read_retries: Some(resolved.read_retries),
            retry_delay_ms: Some(resolved.retry_delay.as_millis() as u64),
            detect_timeout_secs: Some(resolved.detect_timeout.as_secs()),
            image_timeout_secs: Some(resolved.image_timeout.as_secs()),
            profiling: Some(resolved.profiling),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            cache_enabled: other.cache_enabled.or(self.cache_enabled),
            cache_ttl_ms: other.cache_ttl_ms.or(self.cache_ttl_ms),
            read_retries: other.read_retries.or(self.read_retries),
            retry_delay_ms: other.retry_delay_ms.or(self.retry_delay_ms),
            detect_timeout_secs: other.detect_timeout_secs.or(self.detect_timeout_secs),
            image_timeout_secs: other.image_timeout_secs.or(self.image_timeout_secs),
            profiling: other.profiling.or(self.profiling),
        }
    }

    /// Resolve into a concrete [`ClipboardConfig`], filling missing fields
    /// with defaults.
    pub fn resolve(&self) -> ClipboardConfig {
        let defaults = ClipboardConfig::default();
        ClipboardConfig {
            cache_enabled: self.cache_enabled.unwrap_or(defaults.cache_enabled),
            cache_ttl: self
                .cache_ttl_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.cache_ttl),
            read_retries: self.read_retries.unwrap_or(defaults.read_retries),
            retry_delay: self
                .retry_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry_delay),
            detect_timeout: self
                .detect_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.detect_timeout),
            image_timeout: self
                .image_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.image_timeout),
            profiling: self.profiling.unwrap_or(defaults.profiling),
        }
    }
}

/// Resolved configuration supplied at manager construction.
///
/// Environment variables are parsed only at the application boundary
/// (see `infrastructure::config`), never inside the core.
#[derive(Debug, Clone)]
pub struct ClipboardConfig {
    /// Whether the snapshot cache is consulted at all
    pub cache_enabled: bool,
    /// Validity window of a cached snapshot
    pub cache_ttl: Duration,
    /// Read attempts before giving up on a transient failure
    pub read_retries: u32,
    /// Fixed delay between read attempts
    pub retry_delay: Duration,
    /// Bound on probe content-type detection
    pub detect_timeout: Duration,
    /// Bound on probe image extraction/injection
    pub image_timeout: Duration,
    /// Whether phase profiling starts enabled
    pub profiling: bool,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_ttl: Duration::from_millis(1000),
            read_retries: 3,
            retry_delay: Duration::from_millis(15),
            detect_timeout: Duration::from_secs(5),
            image_timeout: Duration::from_secs(10),
            profiling: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_resolves_to_defaults() {
        let resolved = AppConfig::empty().resolve();
        assert!(resolved.cache_enabled);
        assert_eq!(resolved.cache_ttl, Duration::from_millis(1000));
        assert_eq!(resolved.read_retries, 3);
        assert_eq!(resolved.retry_delay, Duration::from_millis(15));
        assert_eq!(resolved.detect_timeout, Duration::from_secs(5));
        assert_eq!(resolved.image_timeout, Duration::from_secs(10));
        assert!(!resolved.profiling);
    }

    #[test]
    fn merge_prefers_other() {
        let base = AppConfig {
            cache_ttl_ms: Some(500),
            read_retries: Some(5),
            ..AppConfig::empty()
        };
        let other = AppConfig {
            cache_ttl_ms: Some(2000),
            ..AppConfig::empty()
        };

        let merged = base.merge(other);
        assert_eq!(merged.cache_ttl_ms, Some(2000));
        assert_eq!(merged.read_retries, Some(5));
    }

    #[test]
    fn partial_config_resolves_overrides() {
        let config = AppConfig {
            cache_enabled: Some(false),
            profiling: Some(true),
            ..AppConfig::empty()
        };
        let resolved = config.resolve();
        assert!(!resolved.cache_enabled);
        assert!(resolved.profiling);
        assert_eq!(resolved.read_retries, 3);
    }

    #[test]
    fn toml_round_trip() {
        let config = AppConfig::defaults();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.cache_ttl_ms, config.cache_ttl_ms);
        assert_eq!(parsed.profiling, config.profiling);
    }
}
