//! Process-wide tracking of concurrently in-flight write operations.
//!
//! The counter is the only truly shared mutable state in the system. It is
//! an explicit resource injected into store constructors, never an ambient
//! global, and every mutation goes through a scoped guard so the balance
//! invariant (every increment has exactly one decrement, on every exit path)
//! is enforced by the type system rather than by caller discipline.

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter of in-flight write operations.
///
/// Shared via `Arc` between every store instance that should observe the
/// same load. `current_load` never goes negative: decrements only happen in
/// [`WriteGuard::drop`], and a guard exists only after an increment.
#[derive(Debug, Default)]
pub struct ContentionTracker {
    active_writes: AtomicU64,
}

impl ContentionTracker {
    /// Creates a tracker with zero in-flight writes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a write as in-flight and returns its scoped handle.
    ///
    /// The matching decrement runs when the guard drops, including on error
    /// returns and panic unwinding.
    pub fn acquire(&self) -> WriteGuard<'_> {
        self.active_writes.fetch_add(1, Ordering::SeqCst);
        WriteGuard { tracker: self }
    }

    /// Snapshot of the number of writes currently in flight.
    pub fn current_load(&self) -> u64 {
        self.active_writes.load(Ordering::SeqCst)
    }
}

/// Scoped handle for one in-flight write.
#[derive(Debug)]
pub struct WriteGuard<'a> {
    tracker: &'a ContentionTracker,
}

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        self.tracker.active_writes.fetch_sub(1, Ordering::SeqCst);
    }
}
