//! Last-observed clipboard snapshot and its short-TTL cache

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::domain::content::{classify, ContentType};

/// Last-known clipboard state with a validity window.
///
/// Created/overwritten on any successful classified read; invalidated by
/// every write/clear. Staleness relative to external clipboard mutation by
/// other processes within the TTL is an accepted tradeoff.
#[derive(Debug, Clone)]
pub struct ClipboardSnapshot {
    /// Raw clipboard text as read from the backend
    pub raw: String,
    /// Whether the clipboard is effectively empty
    pub is_empty: bool,
    /// Classified content type
    pub content_type: ContentType,
    /// When this snapshot was captured
    pub captured_at: Instant,
}

/// Decides whether snapshots may be served from cache and for how long.
///
/// Injected at manager construction so cache behavior is an explicit
/// strategy instead of inline environment inspection.
pub trait CachePolicy: Send + Sync {
    /// Whether caching applies at all
    fn should_cache(&self) -> bool;

    /// Maximum snapshot age before it is considered stale
    fn ttl(&self) -> Duration;
}

/// Serve snapshots from cache within a fixed TTL.
#[derive(Debug, Clone, Copy)]
pub struct TtlCachePolicy {
    ttl: Duration,
}

impl TtlCachePolicy {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }
}

impl CachePolicy for TtlCachePolicy {
    fn should_cache(&self) -> bool {
        true
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Never serve from cache; every call hits the backend.
///
/// Used when caching is disabled by configuration or in deterministic tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCachePolicy;

impl CachePolicy for DisabledCachePolicy {
    fn should_cache(&self) -> bool {
        false
    }

    fn ttl(&self) -> Duration {
        Duration::ZERO
    }
}

/// Single-slot memoization of the last observed clipboard state.
///
/// The slot is guarded by a mutex held only for short non-async critical
/// sections, so overlapping operations cannot corrupt it.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    slot: Mutex<Option<ClipboardSnapshot>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a clone of the cached snapshot if the policy allows caching
    /// and the snapshot is still within its TTL.
    pub fn get(&self, policy: &dyn CachePolicy) -> Option<ClipboardSnapshot> {
        if !policy.should_cache() {
            return None;
        }
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.as_ref()
            .filter(|snap| snap.captured_at.elapsed() <= policy.ttl())
            .cloned()
    }

    /// Store a new snapshot, classifying `raw` unless a type hint is given
    /// (e.g. when a platform probe already identified an image).
    pub fn update(&self, raw: &str, type_hint: Option<ContentType>) {
        let content_type = type_hint.unwrap_or_else(|| classify(raw));
        let snapshot = ClipboardSnapshot {
            raw: raw.to_string(),
            is_empty: content_type == ContentType::Empty,
            content_type,
            captured_at: Instant::now(),
        };
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(snapshot);
    }

    /// Drop the cached snapshot so the next read reflects fresh state.
    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_snapshot_is_served_within_ttl() {
        let cache = SnapshotCache::new();
        let policy = TtlCachePolicy::new(Duration::from_secs(5));
        cache.update("hello", None);

        let snap = cache.get(&policy).unwrap();
        assert_eq!(snap.raw, "hello");
        assert_eq!(snap.content_type, ContentType::Text);
        assert!(!snap.is_empty);
    }

    #[test]
    fn expired_snapshot_is_not_served() {
        let cache = SnapshotCache::new();
        let policy = TtlCachePolicy::new(Duration::ZERO);
        cache.update("hello", None);

        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get(&policy).is_none());
    }

    #[test]
    fn disabled_policy_never_serves() {
        let cache = SnapshotCache::new();
        cache.update("hello", None);
        assert!(cache.get(&DisabledCachePolicy).is_none());
    }

    #[test]
    fn invalidate_clears_the_slot() {
        let cache = SnapshotCache::new();
        let policy = TtlCachePolicy::new(Duration::from_secs(5));
        cache.update("hello", None);
        cache.invalidate();
        assert!(cache.get(&policy).is_none());
    }

    #[test]
    fn type_hint_overrides_classification() {
        let cache = SnapshotCache::new();
        let policy = TtlCachePolicy::new(Duration::from_secs(5));
        // An image-only clipboard reads as empty text; the probe's hint wins
        cache.update("", Some(ContentType::Image));

        let snap = cache.get(&policy).unwrap();
        assert_eq!(snap.content_type, ContentType::Image);
        assert!(!snap.is_empty);
    }

    #[test]
    fn update_overwrites_previous_snapshot() {
        let cache = SnapshotCache::new();
        let policy = TtlCachePolicy::new(Duration::from_secs(5));
        cache.update("first", None);
        cache.update("second", None);
        assert_eq!(cache.get(&policy).unwrap().raw, "second");
    }
}
