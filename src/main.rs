use clap::Parser;
use tracing_subscriber::{EnvFilter, prelude::*};
use trendscore::cli::{run, Cli};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    // A second init (e.g. under a test harness) is harmless.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}

fn main() -> std::process::ExitCode {
    init_tracing();
    run(Cli::parse())
}
