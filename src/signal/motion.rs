use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide reduced-motion toggle.
///
/// Clones share the flag. The scheduler reads it on every emit, so flipping it takes effect for
/// the next signal without touching the ones already traveling.
#[derive(Clone, Debug, Default)]
pub struct ReducedMotion(Arc<AtomicBool>);

impl ReducedMotion {
    /// Flag with the given initial value.
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    /// Turn reduced motion on or off.
    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::Relaxed);
    }

    /// Current value.
    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
