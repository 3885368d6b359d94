// src/session/store.rs
use super::SessionRun;
use std::sync::{Arc, Mutex, PoisonError};

/// Lock-guarded single slot holding the most recent session run.
///
/// Writers replace the whole `Arc`, so a reader sees either the previous run
/// or the new one, never a partial write. Create one per process and share it
/// by `Arc` with whatever serves requests.
#[derive(Debug, Default)]
pub struct LatestResults {
    slot: Mutex<Option<Arc<SessionRun>>>,
}

impl LatestResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored run.
    pub fn publish(&self, run: SessionRun) -> Arc<SessionRun> {
        let run = Arc::new(run);
        // The slot only ever holds a complete value, so a poisoned lock is still consistent.
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::clone(&run));
        run
    }

    /// The most recent run, if any.
    pub fn latest(&self) -> Option<Arc<SessionRun>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Empties the slot.
    pub fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
