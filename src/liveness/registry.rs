//! Per-worker liveness flags with a read-and-clear check operation.

use parking_lot::Mutex;

/// Index of a worker in the registry. Minted once by the runtime at startup;
/// never constructed from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkerId(pub usize);

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "worker-{}", self.0)
    }
}

/// One liveness flag per worker.
///
/// Invariant: a flag goes false→true only via [`publish`](Self::publish)
/// (called by the owning worker after a verified-correct iteration) and
/// true→false only via [`check_and_clear_all`](Self::check_and_clear_all)
/// (called by the monitor). Both run under the same mutex, so each check
/// window observes exactly the publishes that happened inside it — a publish
/// is never attributed to two windows or to none.
#[derive(Debug)]
pub struct LivenessRegistry {
    flags: Mutex<Box<[bool]>>,
}

impl LivenessRegistry {
    /// Create a registry for `worker_count` workers, all flags cleared.
    #[must_use]
    pub fn new(worker_count: usize) -> Self {
        Self {
            flags: Mutex::new(vec![false; worker_count].into_boxed_slice()),
        }
    }

    /// Number of workers the registry tracks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.lock().len()
    }

    /// Whether the registry tracks no workers at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mark `id`'s flag true. Infallible; an out-of-range id (impossible for
    /// runtime-minted ids) is asserted in debug builds and ignored otherwise.
    pub fn publish(&self, id: WorkerId) {
        let mut flags = self.flags.lock();
        debug_assert!(id.0 < flags.len(), "worker id out of range: {id}");
        if let Some(flag) = flags.get_mut(id.0) {
            *flag = true;
        }
    }

    /// Evaluate one check window: true iff every worker published since the
    /// previous call. All flags are cleared as a side effect, pass or fail,
    /// so the next window starts clean. Runs as a single locked region
    /// relative to every [`publish`](Self::publish).
    #[must_use]
    pub fn check_and_clear_all(&self) -> bool {
        let mut flags = self.flags.lock();
        let all_alive = flags.iter().all(|flag| *flag);
        flags.fill(false);
        all_alive
    }
}
