use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable flag that stops a run at the next tick boundary.
///
/// The run result is finalized exactly as on normal completion, with status
/// `Aborted`.
#[derive(Clone, Debug, Default)]
pub struct AbortHandle(Arc<AtomicBool>);

impl AbortHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
