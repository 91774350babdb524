#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc)]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
pub mod classifier;
mod cli;
pub mod error;
pub mod output;
pub mod providers;
pub mod search;
pub mod search_type;
mod user_config;

pub use app::report_error;

/// Runs the command-line client.
///
/// This parses the arguments, resolves the API key, then either runs one
/// search of the requested type or classifies the query and runs every
/// relevant search type.
///
/// # Errors
///
/// Returns a configuration error when no API key is available, or the search
/// error of a failed manual-mode request. Auto-mode failures are reported per
/// search type and never surface here.
pub async fn run() -> Result<()> {
  let cli = cli::Cli::parse();
  init_tracing(cli.verbose);

  let app = app::App::new(cli)?;
  app.run().await
}

fn init_tracing(verbose: bool) {
  let default = if verbose { "checkmaa=debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(default));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}
