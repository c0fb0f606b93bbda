//! Phase profiler port interface

use std::time::Duration;

/// Aggregated timing for one named phase.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseStats {
    /// Phase name (e.g. `backend-read`, `probe-detect`)
    pub phase: String,
    /// Number of recorded samples
    pub count: u64,
    /// Total elapsed milliseconds across all samples
    pub total_ms: f64,
    /// Mean elapsed milliseconds per sample
    pub avg_ms: f64,
}

/// Port for opt-in operation timing.
///
/// An explicit collector object injected at construction; implementations
/// own their state and expose it only through `export`/`reset`.
pub trait PhaseProfiler: Send + Sync {
    /// Record one sample for a named phase. A disabled profiler drops it.
    fn record(&self, phase: &str, elapsed: Duration);

    /// Snapshot the aggregated stats, sorted by phase name.
    fn export(&self) -> Vec<PhaseStats>;

    /// Clear all aggregated stats.
    fn reset(&self);

    /// Turn sample collection on or off.
    fn set_enabled(&self, enabled: bool);
}
