//! Phase profiler adapters

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{PhaseProfiler, PhaseStats};

#[derive(Debug, Default, Clone, Copy)]
struct Accum {
    count: u64,
    total: Duration,
}

/// In-memory phase profiler.
///
/// Aggregates `{count, total, avg}` per named phase. State is owned by the
/// instance and exposed only through `export`/`reset`; there is no
/// process-wide mutable map.
pub struct InMemoryProfiler {
    enabled: AtomicBool,
    phases: Mutex<HashMap<String, Accum>>,
}

impl InMemoryProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            phases: Mutex::new(HashMap::new()),
        }
    }
}

impl PhaseProfiler for InMemoryProfiler {
    fn record(&self, phase: &str, elapsed: Duration) {
        if !self.enabled.load(Ordering::Relaxed) {
            return;
        }
        let mut phases = self.phases.lock().unwrap_or_else(|e| e.into_inner());
        let accum = phases.entry(phase.to_string()).or_default();
        accum.count += 1;
        accum.total += elapsed;
    }

    fn export(&self) -> Vec<PhaseStats> {
        let phases = self.phases.lock().unwrap_or_else(|e| e.into_inner());
        let mut stats: Vec<PhaseStats> = phases
            .iter()
            .map(|(phase, accum)| {
                let total_ms = accum.total.as_secs_f64() * 1000.0;
                PhaseStats {
                    phase: phase.clone(),
                    count: accum.count,
                    total_ms,
                    avg_ms: total_ms / accum.count as f64,
                }
            })
            .collect();
        stats.sort_by(|a, b| a.phase.cmp(&b.phase));
        stats
    }

    fn reset(&self) {
        self.phases
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }
}

/// Profiler that drops every sample
///
/// Used when instrumentation is disabled entirely.
#[derive(Debug, Default)]
pub struct NoopProfiler;

impl PhaseProfiler for NoopProfiler {
    fn record(&self, _phase: &str, _elapsed: Duration) {}

    fn export(&self) -> Vec<PhaseStats> {
        Vec::new()
    }

    fn reset(&self) {}

    fn set_enabled(&self, _enabled: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_counts_and_totals() {
        let profiler = InMemoryProfiler::new(true);
        profiler.record("backend-read", Duration::from_millis(10));
        profiler.record("backend-read", Duration::from_millis(30));
        profiler.record("probe-detect", Duration::from_millis(5));

        let stats = profiler.export();
        assert_eq!(stats.len(), 2);
        // Sorted by phase name
        assert_eq!(stats[0].phase, "backend-read");
        assert_eq!(stats[0].count, 2);
        assert!((stats[0].total_ms - 40.0).abs() < 1.0);
        assert!((stats[0].avg_ms - 20.0).abs() < 1.0);
        assert_eq!(stats[1].phase, "probe-detect");
    }

    #[test]
    fn disabled_profiler_drops_samples() {
        let profiler = InMemoryProfiler::new(false);
        profiler.record("backend-read", Duration::from_millis(10));
        assert!(profiler.export().is_empty());

        profiler.set_enabled(true);
        profiler.record("backend-read", Duration::from_millis(10));
        assert_eq!(profiler.export().len(), 1);
    }

    #[test]
    fn reset_clears_stats() {
        let profiler = InMemoryProfiler::new(true);
        profiler.record("backend-read", Duration::from_millis(10));
        profiler.reset();
        assert!(profiler.export().is_empty());
    }

    #[test]
    fn noop_profiler_exports_nothing() {
        let profiler = NoopProfiler;
        profiler.record("backend-read", Duration::from_millis(10));
        assert!(profiler.export().is_empty());
    }
}
