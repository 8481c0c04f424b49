//! Completion tracker: counts in-flight tasks; `wait` returns when the count reaches zero.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};

type Shared = Arc<(Mutex<usize>, Condvar)>;

/// Cloneable handle; all clones share one counter.
#[derive(Clone, Default)]
pub struct CompletionTracker {
    inner: Shared,
}

/// Calls [`CompletionTracker::done`] when dropped, including on unwind.
pub struct TrackerGuard {
    tracker: CompletionTracker,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        // A panic while holding this lock cannot leave the counter half-updated.
        self.inner.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn add(&self, n: usize) {
        *self.lock() += n;
    }

    /// Mark one task finished. Panics if no task is outstanding.
    pub fn done(&self) {
        let mut count = self.lock();
        assert!(*count > 0, "completion tracker: negative counter");
        *count -= 1;
        if *count == 0 {
            self.inner.1.notify_all();
        }
    }

    /// Register one task and get a guard that finishes it on drop.
    pub fn enter(&self) -> TrackerGuard {
        self.add(1);
        TrackerGuard {
            tracker: self.clone(),
        }
    }

    /// Guard that finishes one already-added task on drop.
    pub fn done_on_drop(&self) -> TrackerGuard {
        TrackerGuard {
            tracker: self.clone(),
        }
    }

    /// Block until the counter is zero. Returns immediately if nothing is outstanding.
    pub fn wait(&self) {
        let mut count = self.lock();
        while *count > 0 {
            count = self
                .inner
                .1
                .wait(count)
                .unwrap_or_else(|e| e.into_inner());
        }
    }

    /// Outstanding tasks right now.
    pub fn count(&self) -> usize {
        *self.lock()
    }
}

impl Drop for TrackerGuard {
    fn drop(&mut self) {
        self.tracker.done();
    }
}
