//! Unix signal handling: SIGUSR1 behaves like the external "status" event,
//! SIGTERM/SIGINT stop the daemon.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::consts::signal::{SIGINT, SIGTERM, SIGUSR1};
use signal_hook::iterator::Signals;

use crate::console::Console;
use crate::core::errors::{LsnError, Result};
use crate::liveness::CheckLatch;
use crate::trigger::input::{handle_event, InputEvent};

/// Install the signal listener thread. The handlers obey the trigger
/// contract: they set flags and write one console line, nothing more.
pub fn install(
    latch: Arc<CheckLatch>,
    console: Arc<dyn Console>,
    shutdown: Arc<AtomicBool>,
) -> Result<()> {
    let mut signals =
        Signals::new([SIGUSR1, SIGTERM, SIGINT]).map_err(|source| LsnError::Spawn {
            component: "signal-listener",
            source,
        })?;

    std::thread::Builder::new()
        .name("lsn-signals".to_string())
        .spawn(move || {
            for signal in signals.forever() {
                match signal {
                    SIGUSR1 => handle_event(InputEvent::Status, &latch, console.as_ref()),
                    SIGTERM | SIGINT => {
                        tracing::info!(signal, "shutdown signal received");
                        shutdown.store(true, Ordering::Release);
                        break;
                    }
                    _ => {}
                }
            }
        })
        .map_err(|source| LsnError::Spawn {
            component: "signal-listener",
            source,
        })?;
    Ok(())
}
