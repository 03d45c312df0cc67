//! Liveness sentinel: a fixed set of worker threads repeatedly perform a
//! verifiable computation and publish "still alive" evidence into a shared
//! registry; a monitor thread consumes check requests (periodic timer or
//! external event) and reports PASS/FAIL for each check window.
//!
//! The concurrency-correctness core is small and deliberate:
//! - [`liveness::LivenessRegistry`] — one flag per worker, set by the worker,
//!   read-and-cleared atomically by the monitor once per window.
//! - [`liveness::CheckLatch`] — a request latch any trigger may set without
//!   blocking; only the monitor consumes it.
//! - [`monitor::Monitor`] — polls the latch, evaluates the registry exactly
//!   once per request, emits one report line per check.
//!
//! Everything else (scheduling, timers, console) is a narrow collaborator.

#[cfg(feature = "cli")]
pub mod cli_app;
pub mod console;
pub mod core;
pub mod daemon;
pub mod liveness;
pub mod monitor;
pub mod trigger;
pub mod worker;

pub use crate::core::errors::{LsnError, Result};
