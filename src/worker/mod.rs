//! Worker: a thread that repeatedly performs a fixed verifiable computation
//! and publishes liveness into the registry after each correct iteration.
//!
//! Fault handling is sticky on purpose: a worker whose computation ever
//! produces a wrong result stops publishing forever, so the monitor keeps
//! reporting FAIL instead of flapping between PASS and FAIL.

use std::hint::black_box;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::liveness::{LivenessRegistry, WorkerId};

/// The deterministic computation `((term_a + term_b) * factor) / divisor`
/// in wrapping `i64` arithmetic, plus the value a correct run must produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputePlan {
    /// First addend.
    pub term_a: i64,
    /// Second addend.
    pub term_b: i64,
    /// Multiplier applied to the sum.
    pub factor: i64,
    /// Divisor applied last; validated nonzero by the config layer.
    pub divisor: i64,
    /// Expected-result override; `None` derives it from the operands.
    pub expected_override: Option<i64>,
}

impl ComputePlan {
    /// Plan for the classic demo constants: `((123 + 234567) * -3) / 7`.
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            term_a: 123,
            term_b: 234_567,
            factor: -3,
            divisor: 7,
            expected_override: None,
        }
    }

    /// Execute the computation once. Every intermediate passes through
    /// [`black_box`] so the stores are not provably dead and the whole chain
    /// cannot be constant-folded away.
    #[must_use]
    pub fn run(&self) -> i64 {
        let mut value = black_box(self.term_a);
        value = black_box(value.wrapping_add(self.term_b));
        value = black_box(value.wrapping_mul(self.factor));
        value = black_box(value.wrapping_div(self.divisor));
        value
    }

    /// The value a correct iteration must produce.
    #[must_use]
    pub fn expected(&self) -> i64 {
        self.expected_override.unwrap_or_else(|| {
            self.term_a
                .wrapping_add(self.term_b)
                .wrapping_mul(self.factor)
                .wrapping_div(self.divisor)
        })
    }
}

/// Health of a single worker. `Faulted` is terminal: no transition leads
/// back to `Healthy` short of a process restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerStatus {
    /// Every iteration so far validated correctly.
    Healthy,
    /// At least one iteration produced a wrong result.
    Faulted,
}

/// One worker: identity, its computation, and its sticky health status.
/// Owned exclusively by its thread; only the registry flag is shared.
#[derive(Debug)]
pub struct Worker {
    id: WorkerId,
    plan: ComputePlan,
    registry: Arc<LivenessRegistry>,
    status: WorkerStatus,
}

impl Worker {
    /// A fresh, healthy worker bound to its registry slot.
    #[must_use]
    pub fn new(id: WorkerId, plan: ComputePlan, registry: Arc<LivenessRegistry>) -> Self {
        Self {
            id,
            plan,
            registry,
            status: WorkerStatus::Healthy,
        }
    }

    /// This worker's registry slot.
    #[must_use]
    pub const fn id(&self) -> WorkerId {
        self.id
    }

    /// Current health.
    #[must_use]
    pub const fn status(&self) -> WorkerStatus {
        self.status
    }

    /// One Computing → Validating → (Publishing) iteration.
    ///
    /// A wrong result latches `Faulted`; a faulted worker keeps computing but
    /// never publishes again. Returns whether this iteration published.
    pub fn step(&mut self) -> bool {
        let value = self.plan.run();
        if value != self.plan.expected() {
            if self.status == WorkerStatus::Healthy {
                tracing::warn!(worker = %self.id, value, expected = self.plan.expected(),
                    "computation fault; worker stops publishing liveness");
            }
            self.status = WorkerStatus::Faulted;
        }
        if self.status == WorkerStatus::Healthy {
            self.registry.publish(self.id);
            true
        } else {
            false
        }
    }

    /// Run iterations until `shutdown` is raised, yielding once per loop so
    /// peers and the monitor get a turn under cooperative scheduling.
    pub fn run(&mut self, shutdown: &AtomicBool) {
        tracing::debug!(worker = %self.id, "worker loop started");
        while !shutdown.load(Ordering::Acquire) {
            self.step();
            std::thread::yield_now();
        }
        tracing::debug!(worker = %self.id, "worker loop stopped");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{ComputePlan, Worker, WorkerStatus};
    use crate::liveness::{LivenessRegistry, WorkerId};

    #[test]
    fn classic_plan_validates_its_own_result() {
        let plan = ComputePlan::classic();
        assert_eq!(plan.run(), plan.expected());
    }

    #[test]
    fn classic_expected_matches_integer_truncation() {
        // ((123 + 234567) * -3) / 7 with i64 truncating division.
        assert_eq!(ComputePlan::classic().expected(), -100_581);
    }

    #[test]
    fn healthy_worker_publishes_each_step() {
        let registry = Arc::new(LivenessRegistry::new(1));
        let mut worker = Worker::new(WorkerId(0), ComputePlan::classic(), Arc::clone(&registry));
        assert!(worker.step());
        assert_eq!(worker.status(), WorkerStatus::Healthy);
        assert!(registry.check_and_clear_all());
    }

    #[test]
    fn mismatched_expectation_faults_on_first_step() {
        let registry = Arc::new(LivenessRegistry::new(1));
        let plan = ComputePlan {
            expected_override: Some(0),
            ..ComputePlan::classic()
        };
        let mut worker = Worker::new(WorkerId(0), plan, Arc::clone(&registry));
        assert!(!worker.step());
        assert_eq!(worker.status(), WorkerStatus::Faulted);
        assert!(!registry.check_and_clear_all());
    }

    #[test]
    fn fault_is_sticky_across_steps() {
        let registry = Arc::new(LivenessRegistry::new(1));
        let plan = ComputePlan {
            expected_override: Some(0),
            ..ComputePlan::classic()
        };
        let mut worker = Worker::new(WorkerId(0), plan, Arc::clone(&registry));
        for _ in 0..10 {
            assert!(!worker.step());
        }
        assert_eq!(worker.status(), WorkerStatus::Faulted);
        assert!(!registry.check_and_clear_all());
    }
}
