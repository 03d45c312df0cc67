//! `lsn` binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = liveness_sentinel::cli_app::Cli::parse();
    if let Err(err) = liveness_sentinel::cli_app::run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
