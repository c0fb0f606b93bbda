//! Execution-context capability port

use std::sync::Arc;

/// Host-supplied check for a headless execution context.
///
/// The argument mirrors the hosting application's
/// `is_headless_environment(exclude_when_injected)` contract: when `true`,
/// the caller intends an injected test backend to override the headless
/// verdict (the manager combines this with its own injection check).
pub type HeadlessPredicate = Arc<dyn Fn(bool) -> bool + Send + Sync>;

/// Predicate that always reports an interactive environment.
pub fn always_interactive() -> HeadlessPredicate {
    Arc::new(|_| false)
}

/// Predicate that always reports a headless environment.
pub fn always_headless() -> HeadlessPredicate {
    Arc::new(|_| true)
}
