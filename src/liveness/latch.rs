//! The shared check-request latch.

use std::sync::atomic::{AtomicBool, Ordering};

/// A single boolean request latch.
///
/// Any trigger source may [`request`](Self::request) a check from any context
/// at any time; the operation never blocks and never allocates, so it is safe
/// from timer callbacks and signal-adjacent paths. Only the monitor consumes
/// the latch via [`take`](Self::take). Writers only ever store true, so a
/// race between writers affects timing, never correctness — re-setting an
/// already-set latch is a no-op.
#[derive(Debug, Default)]
pub struct CheckLatch {
    requested: AtomicBool,
}

impl CheckLatch {
    /// A fresh, unset latch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
        }
    }

    /// Request a check. Idempotent, non-blocking, callable from any context.
    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Consume a pending request, if any. Monitor-only: the swap guarantees
    /// each request is observed exactly once no matter how many triggers
    /// raced to set it.
    #[must_use]
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }

    /// Peek without consuming. Diagnostic use only.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::CheckLatch;

    #[test]
    fn starts_unset() {
        let latch = CheckLatch::new();
        assert!(!latch.is_requested());
        assert!(!latch.take());
    }

    #[test]
    fn take_consumes_exactly_once() {
        let latch = CheckLatch::new();
        latch.request();
        assert!(latch.take());
        assert!(!latch.take());
    }

    #[test]
    fn repeated_requests_collapse_into_one() {
        let latch = CheckLatch::new();
        latch.request();
        latch.request();
        latch.request();
        assert!(latch.take());
        assert!(!latch.take());
    }

    #[test]
    fn concurrent_requesters_never_lose_a_request() {
        use std::sync::Arc;

        let latch = Arc::new(CheckLatch::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let latch = Arc::clone(&latch);
                std::thread::spawn(move || latch.request())
            })
            .collect();
        for handle in handles {
            handle.join().expect("requester thread panicked");
        }
        assert!(latch.take());
        assert!(!latch.take());
    }
}
