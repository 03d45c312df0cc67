//! External-event trigger: maps operator input codes onto check requests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::console::Console;
use crate::liveness::CheckLatch;

/// Input code requesting an immediate status check.
pub const STATUS_CODE: char = 's';
/// Input code requesting a worker restart.
pub const RESTART_CODE: char = 'r';

/// Recognized external events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Request an immediate liveness check.
    Status,
    /// Request a worker restart. Acknowledged but not performed: restarting
    /// workers requires a full process restart in this design.
    Restart,
}

impl InputEvent {
    /// Map an input code onto an event; unrecognized codes are ignored.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            STATUS_CODE => Some(Self::Status),
            RESTART_CODE => Some(Self::Restart),
            _ => None,
        }
    }
}

/// Handle one external event. Never blocks beyond the console line mutex,
/// never evaluates liveness inline; a status event only raises the latch for
/// the monitor to consume.
pub fn handle_event(event: InputEvent, latch: &CheckLatch, console: &dyn Console) {
    match event {
        InputEvent::Status => {
            console.write_line("manual status check requested");
            latch.request();
        }
        InputEvent::Restart => {
            console.write_line("restart requested");
            console.write_line("note: worker restart requires a full process restart; no state was changed");
        }
    }
}

/// Read single-character commands from `reader` until EOF or shutdown,
/// feeding recognized codes through [`handle_event`]. The daemon points this
/// at stdin; tests at a cursor.
pub fn run_input_pump<R: std::io::BufRead>(
    mut reader: R,
    latch: &Arc<CheckLatch>,
    console: &Arc<dyn Console>,
    shutdown: &AtomicBool,
) {
    let mut line = String::new();
    tracing::debug!("input pump started");
    while !shutdown.load(Ordering::Acquire) {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                for code in line.trim().chars() {
                    if let Some(event) = InputEvent::from_code(code) {
                        handle_event(event, latch, console.as_ref());
                    } else {
                        tracing::trace!(%code, "ignoring unrecognized input code");
                    }
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "input pump read failed; stopping");
                break;
            }
        }
    }
    tracing::debug!("input pump stopped");
}
