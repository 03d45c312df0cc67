//! Monitor: consumes check requests and evaluates the liveness registry
//! exactly once per request.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::console::Console;
use crate::liveness::{CheckLatch, LivenessRegistry};

/// Outcome of one check window. Transient: rendered to the console and, via
/// `Serialize`, to the CLI's JSON mode; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Monotonically increasing check number, starting at 1.
    pub seq: u64,
    /// Whether every worker published at least once in this window.
    pub pass: bool,
    /// Number of workers evaluated.
    pub workers: usize,
}

impl CheckReport {
    /// The one-line operator-facing rendering of this report.
    #[must_use]
    pub fn render(&self) -> String {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        let verdict = if self.pass {
            "PASS"
        } else {
            "FAIL - at least one worker made no progress"
        };
        format!("[{timestamp}] status check #{}: {verdict}", self.seq)
    }
}

/// The monitor loop: poll the latch, consume it, evaluate the registry,
/// report. A FAIL is reported and the loop keeps running; nothing here is
/// fatal.
pub struct Monitor {
    registry: Arc<LivenessRegistry>,
    latch: Arc<CheckLatch>,
    console: Arc<dyn Console>,
    poll_interval: Duration,
    seq: u64,
}

impl Monitor {
    /// Build a monitor over the shared registry and latch.
    #[must_use]
    pub fn new(
        registry: Arc<LivenessRegistry>,
        latch: Arc<CheckLatch>,
        console: Arc<dyn Console>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            registry,
            latch,
            console,
            poll_interval,
            seq: 0,
        }
    }

    /// Number of checks performed so far.
    #[must_use]
    pub const fn checks_performed(&self) -> u64 {
        self.seq
    }

    /// Handle at most one pending check request.
    ///
    /// Consuming the latch and evaluating the registry happen back to back;
    /// the latch swap guarantees one evaluation per request even when several
    /// triggers raced, and the registry's own lock makes the evaluation
    /// atomic relative to publishes. The report line is a single console
    /// write, so trigger output can never split it.
    pub fn poll_once(&mut self) -> Option<CheckReport> {
        if !self.latch.take() {
            return None;
        }
        let pass = self.registry.check_and_clear_all();
        self.seq += 1;
        let report = CheckReport {
            seq: self.seq,
            pass,
            workers: self.registry.len(),
        };
        self.console.write_line(&report.render());
        if !pass {
            tracing::warn!(seq = report.seq, "liveness check failed");
        }
        Some(report)
    }

    /// Poll until `shutdown` is raised, sleeping the fixed poll interval
    /// between misses. A polling wait is an accepted trade-off here; the
    /// trigger side must stay non-blocking, and the interval bounds report
    /// latency well enough.
    pub fn run(&mut self, shutdown: &AtomicBool) {
        tracing::debug!("monitor loop started");
        while !shutdown.load(Ordering::Acquire) {
            if self.poll_once().is_none() {
                std::thread::sleep(self.poll_interval);
            }
        }
        tracing::debug!(checks = self.seq, "monitor loop stopped");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::Monitor;
    use crate::console::{Console, MemoryConsole};
    use crate::liveness::{CheckLatch, LivenessRegistry, WorkerId};

    fn monitor_fixture(workers: usize) -> (Monitor, Arc<LivenessRegistry>, Arc<CheckLatch>, Arc<MemoryConsole>) {
        let registry = Arc::new(LivenessRegistry::new(workers));
        let latch = Arc::new(CheckLatch::new());
        let console = Arc::new(MemoryConsole::new());
        let monitor = Monitor::new(
            Arc::clone(&registry),
            Arc::clone(&latch),
            Arc::clone(&console) as Arc<dyn Console>,
            Duration::from_millis(1),
        );
        (monitor, registry, latch, console)
    }

    #[test]
    fn no_request_means_no_report() {
        let (mut monitor, _registry, _latch, console) = monitor_fixture(1);
        assert!(monitor.poll_once().is_none());
        assert!(console.lines().is_empty());
        assert_eq!(monitor.checks_performed(), 0);
    }

    #[test]
    fn request_produces_one_report_and_consumes_the_latch() {
        let (mut monitor, registry, latch, console) = monitor_fixture(1);
        registry.publish(WorkerId(0));
        latch.request();
        let report = monitor.poll_once().expect("a report");
        assert!(report.pass);
        assert_eq!(report.seq, 1);
        assert!(monitor.poll_once().is_none(), "latch must be consumed");
        assert_eq!(console.lines().len(), 1);
        assert!(console.lines()[0].contains("status check #1: PASS"));
    }

    #[test]
    fn duplicate_requests_yield_a_single_check() {
        let (mut monitor, registry, latch, _console) = monitor_fixture(1);
        registry.publish(WorkerId(0));
        latch.request();
        latch.request();
        latch.request();
        assert!(monitor.poll_once().is_some());
        assert!(monitor.poll_once().is_none());
        assert_eq!(monitor.checks_performed(), 1);
    }

    #[test]
    fn sequence_counter_increments_per_report() {
        let (mut monitor, registry, latch, console) = monitor_fixture(1);
        for expected_seq in 1..=3 {
            registry.publish(WorkerId(0));
            latch.request();
            let report = monitor.poll_once().expect("a report");
            assert_eq!(report.seq, expected_seq);
        }
        assert_eq!(console.lines().len(), 3);
    }

    #[test]
    fn silent_worker_fails_the_report_but_clears_the_window() {
        let (mut monitor, registry, latch, console) = monitor_fixture(2);
        registry.publish(WorkerId(0));
        latch.request();
        let report = monitor.poll_once().expect("a report");
        assert!(!report.pass);
        assert!(console.lines()[0].contains("FAIL"));

        // Both publish in the next window; the earlier fail does not linger.
        registry.publish(WorkerId(0));
        registry.publish(WorkerId(1));
        latch.request();
        assert!(monitor.poll_once().expect("a report").pass);
    }
}
