use crate::cli::Cli;
use crate::error::{ConfigError, SearchError};
use crate::providers::checkmaa::Client;
use crate::search::Orchestrator;
use crate::user_config::{self, UserConfig, API_KEY_ENV};
use anyhow::Result;
use console::style;
use std::env;
use std::io::{self, Write};
use std::time::Duration;
use tracing::debug;

pub struct App {
  cli: Cli,
  client: Client,
}

impl App {
  /// Resolves the API key and builds the HTTP transport.
  ///
  /// # Errors
  ///
  /// Fails with [`ConfigError::MissingApiKey`] before any network activity
  /// when no key is configured, or if the key cannot be saved or the HTTP
  /// client cannot be built.
  pub fn new(cli: Cli) -> Result<Self> {
    let api_key = user_config::resolve_api_key(
      cli.api_key.clone(),
      env::var(API_KEY_ENV).ok(),
      &user_config::load(),
    )?;

    if cli.save_key {
      user_config::store(&UserConfig {
        api_key: Some(api_key.clone()),
      })?;
      println!("API key saved to the checkmaa config file.");
    }

    let client = Client::new(api_key)?;
    Ok(Self { cli, client })
  }

  pub async fn run(&self) -> Result<()> {
    let orchestrator = Orchestrator::new(&self.client, self.cli.format)
      .verbose(self.cli.verbose)
      .delay(Duration::from_secs(self.cli.delay));

    if self.cli.auto {
      debug!(query = %self.cli.query, "running in auto mode");
      orchestrator.run_auto(&self.cli.query).await;
    } else if let Some(search_type) = self.cli.search_type {
      debug!(query = %self.cli.query, %search_type, "running in manual mode");
      orchestrator.run_manual(&self.cli.query, search_type).await?;
    }
    Ok(())
  }
}

/// Prints a fatal error with remediation hints to standard error.
pub fn report_error(err: &anyhow::Error) {
  let mut stderr = io::stderr().lock();
  if write_error_report(err, &mut stderr).is_err() {
    eprintln!("Error: {err}");
  }
}

fn write_error_report(
  err: &anyhow::Error,
  out: &mut impl Write,
) -> io::Result<()> {
  if let Some(config) = err.downcast_ref::<ConfigError>() {
    writeln!(
      out,
      "{} {config}",
      style("Configuration Error:").for_stderr().red().bold()
    )?;
    writeln!(out, "\nSet your API key using one of these methods:")?;
    writeln!(
      out,
      "  1. Export environment variable: export {API_KEY_ENV}='your_key'"
    )?;
    writeln!(
      out,
      "  2. Pass via command line: checkmaa -k 'your_key' -q query -t type"
    )?;
    writeln!(
      out,
      "  3. Save it once: checkmaa -k 'your_key' --save-key -q query --auto"
    )?;
    return Ok(());
  }

  writeln!(out, "{} {err}", style("Error:").for_stderr().red().bold())?;

  let forbidden = err
    .downcast_ref::<SearchError>()
    .and_then(SearchError::status)
    == Some(403);
  if forbidden {
    writeln!(out, "\nTroubleshooting API Error 403:")?;
    writeln!(out, "1. Verify your API key is correct")?;
    writeln!(
      out,
      "2. Test with curl to ensure the API is accessible from your location"
    )?;
  }
  Ok(())
}
