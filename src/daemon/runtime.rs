//! Runtime wiring: spawns the worker, monitor, and trigger threads and owns
//! the shared shutdown flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::console::Console;
use crate::core::config::SentinelConfig;
use crate::core::errors::{LsnError, Result};
use crate::liveness::{CheckLatch, LivenessRegistry, WorkerId};
use crate::monitor::Monitor;
use crate::trigger::periodic;
use crate::worker::Worker;

/// A running sentinel: every spawned thread plus the shared state the
/// CLI and signal handlers need to reach.
pub struct Runtime {
    registry: Arc<LivenessRegistry>,
    latch: Arc<CheckLatch>,
    shutdown: Arc<AtomicBool>,
    handles: Vec<JoinHandle<()>>,
}

impl Runtime {
    /// Spawn workers, the monitor, and the periodic trigger per `config`.
    ///
    /// Thread creation can fail when the process is resource-exhausted; that
    /// is surfaced as [`LsnError::Spawn`] so the caller can fall through to
    /// [`idle_spin`] instead of crashing half-initialized.
    pub fn start(config: &SentinelConfig, console: Arc<dyn Console>) -> Result<Self> {
        config.validate()?;

        let registry = Arc::new(LivenessRegistry::new(config.worker_count));
        let latch = Arc::new(CheckLatch::new());
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut handles = Vec::with_capacity(config.worker_count + 2);

        console.write_line(&format!(
            "liveness sentinel starting: {} worker(s), check every {}ms ('s' = status check, 'r' = restart)",
            config.worker_count, config.check_interval_ms
        ));

        for index in 0..config.worker_count {
            let mut worker = Worker::new(WorkerId(index), config.compute_plan(), Arc::clone(&registry));
            let worker_shutdown = Arc::clone(&shutdown);
            handles.push(spawn_named("worker", move || {
                worker.run(&worker_shutdown);
            })?);
        }

        let mut monitor = Monitor::new(
            Arc::clone(&registry),
            Arc::clone(&latch),
            Arc::clone(&console),
            config.poll_interval(),
        );
        let monitor_shutdown = Arc::clone(&shutdown);
        handles.push(spawn_named("monitor", move || {
            monitor.run(&monitor_shutdown);
        })?);

        let trigger_latch = Arc::clone(&latch);
        let trigger_shutdown = Arc::clone(&shutdown);
        let interval = config.check_interval();
        handles.push(spawn_named("periodic-trigger", move || {
            periodic::run(&trigger_latch, interval, &trigger_shutdown);
        })?);

        Ok(Self {
            registry,
            latch,
            shutdown,
            handles,
        })
    }

    /// The shared check-request latch, for external-event triggers.
    #[must_use]
    pub fn latch(&self) -> Arc<CheckLatch> {
        Arc::clone(&self.latch)
    }

    /// The shared liveness registry.
    #[must_use]
    pub fn registry(&self) -> Arc<LivenessRegistry> {
        Arc::clone(&self.registry)
    }

    /// The flag every loop polls to learn the daemon is stopping.
    #[must_use]
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Raise the shutdown flag and join every thread.
    pub fn shutdown(mut self) {
        self.shutdown.store(true, Ordering::Release);
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                tracing::error!("a sentinel thread panicked during shutdown");
            }
        }
    }

    /// Block until the shutdown flag is raised elsewhere, then join.
    pub fn wait(self) {
        while !self.shutdown.load(Ordering::Acquire) {
            std::thread::sleep(Duration::from_millis(100));
        }
        self.shutdown();
    }
}

fn spawn_named(
    component: &'static str,
    body: impl FnOnce() + Send + 'static,
) -> Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name(format!("lsn-{component}"))
        .spawn(body)
        .map_err(|source| LsnError::Spawn { component, source })
}

/// Last-resort startup posture: the process could not bring up its threads,
/// so it parks here forever. An operator sees the process alive but the
/// startup error logged and no reports flowing, which is the signal that
/// initialization did not complete. No automatic retry.
pub fn idle_spin(error: &LsnError) -> ! {
    tracing::error!(code = error.code(), error = %error,
        "startup failed; idling without monitoring");
    loop {
        std::thread::sleep(Duration::from_secs(60));
    }
}
