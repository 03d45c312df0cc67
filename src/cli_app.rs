//! Top-level CLI definition and dispatch.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::console::{Console, StdoutConsole};
use crate::core::config::SentinelConfig;
use crate::core::errors::Result;
use crate::daemon::{runtime, Runtime};
use crate::monitor::CheckReport;
use crate::trigger::input;
use crate::worker::ComputePlan;

/// Liveness sentinel — workers prove progress, a monitor verifies it on demand.
#[derive(Parser)]
#[command(name = "lsn", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run the sentinel in the foreground (workers, monitor, triggers).
    Run {
        /// Path to a TOML configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the configured worker count.
        #[arg(long)]
        workers: Option<usize>,
        /// Override the periodic check interval, in milliseconds.
        #[arg(long)]
        check_interval_ms: Option<u64>,
    },
    /// Perform the verified computation once and report pass/fail.
    Check {
        /// Path to a TOML configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as TOML.
    Config {
        /// Path to a TOML configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Dispatch CLI commands.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run {
            config,
            workers,
            check_interval_ms,
        } => {
            let mut config = SentinelConfig::load(config.as_deref())?;
            if let Some(workers) = workers {
                config.worker_count = workers;
            }
            if let Some(interval) = check_interval_ms {
                config.check_interval_ms = interval;
            }
            run_foreground(&config);
            Ok(())
        }
        Command::Check { config, json } => {
            let config = SentinelConfig::load(config.as_deref())?;
            config.validate()?;
            let report = one_shot_check(&config.compute_plan());
            if json {
                println!("{}", serde_json::to_string(&report)?);
            } else {
                println!("{}", report.render());
            }
            Ok(())
        }
        Command::Config { config } => {
            let config = SentinelConfig::load(config.as_deref())?;
            println!("{}", config.to_toml()?);
            Ok(())
        }
        Command::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "lsn",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

/// Run the daemon until a shutdown signal arrives. Startup failure follows
/// the fall-through policy: log and idle rather than exit, so an operator
/// notices a process that is up but not monitoring.
fn run_foreground(config: &SentinelConfig) {
    let console: Arc<dyn Console> = Arc::new(StdoutConsole::default());
    let runtime = match Runtime::start(config, Arc::clone(&console)) {
        Ok(runtime) => runtime,
        Err(err) => runtime::idle_spin(&err),
    };

    #[cfg(all(unix, feature = "daemon"))]
    if let Err(err) = crate::daemon::signals::install(
        runtime.latch(),
        Arc::clone(&console),
        runtime.shutdown_handle(),
    ) {
        runtime.shutdown();
        runtime::idle_spin(&err);
    }

    // Stdin is the interactive trigger source; EOF just ends the pump, the
    // daemon keeps running on the periodic trigger and signals.
    let pump_latch = runtime.latch();
    let pump_console = Arc::clone(&console);
    let pump_shutdown = runtime.shutdown_handle();
    let pump = std::thread::Builder::new()
        .name("lsn-input".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            input::run_input_pump(stdin.lock(), &pump_latch, &pump_console, &pump_shutdown);
        });
    if let Err(source) = pump {
        tracing::warn!(error = %source, "input pump unavailable; continuing without stdin triggers");
    }

    runtime.wait();
}

/// One iteration of the worker computation, reported like a check window
/// with a single participant.
fn one_shot_check(plan: &ComputePlan) -> CheckReport {
    let pass = plan.run() == plan.expected();
    CheckReport {
        seq: 1,
        pass,
        workers: 1,
    }
}
