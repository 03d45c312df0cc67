//! Liveness signalling core: the per-worker flag registry and the shared
//! check-request latch.

pub mod latch;
pub mod registry;

pub use latch::CheckLatch;
pub use registry::{LivenessRegistry, WorkerId};
