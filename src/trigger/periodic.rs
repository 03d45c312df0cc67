//! Periodic check trigger driven by a crossbeam tick channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{select, tick};

use crate::liveness::CheckLatch;

/// How often a blocked tick loop re-checks the shutdown flag.
const SHUTDOWN_POLL: Duration = Duration::from_millis(50);

/// Request a check on every tick of `interval` until `shutdown` is raised.
///
/// The per-tick work is exactly the trigger contract: one latch store and a
/// trace line. The liveness evaluation itself always happens on the monitor
/// thread, never here, so this loop stays safe to run at timer-callback
/// cadence alongside other timed work.
pub fn run(latch: &Arc<CheckLatch>, interval: Duration, shutdown: &AtomicBool) {
    let ticker = tick(interval);
    let shutdown_poll = tick(SHUTDOWN_POLL.min(interval));
    tracing::debug!(?interval, "periodic trigger started");
    loop {
        select! {
            recv(ticker) -> _ => {
                latch.request();
                tracing::trace!("periodic trigger requested a check");
            }
            recv(shutdown_poll) -> _ => {
                if shutdown.load(Ordering::Acquire) {
                    break;
                }
            }
        }
    }
    tracing::debug!("periodic trigger stopped");
}
