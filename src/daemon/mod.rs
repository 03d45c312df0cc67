//! Daemon subsystem: thread wiring for workers, monitor, and triggers, plus
//! Unix signal handling.

pub mod runtime;
#[cfg(all(unix, feature = "daemon"))]
pub mod signals;

pub use runtime::Runtime;
