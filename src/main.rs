use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use lzp::{
    Lzp,
    config::Config,
};

/// Parse the command line, set up logging and call the Lzp API.
fn main() {
    let cfg = Config::parse();

    let level = if cfg.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = Lzp::new_with_cfg(cfg).run() {
        error!("{err}");
        std::process::exit(1);
    }
}
