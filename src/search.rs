//! Drives searches against a [`Transport`] in manual or auto mode.

use crate::classifier::{self, Detection};
use crate::error::SearchError;
use crate::output::{self, OutputFormat};
use crate::providers::Transport;
use crate::search_type::{Category, SearchType};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::borrow::Cow;
use std::io::{self, Write};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

const RULE: &str = "==================================================";

/// What one search type produced during a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
  Found(Value),
  Failed(String),
}

impl Outcome {
  /// The failure reason: the transport error, or the `error` field of a
  /// response body that carries one.
  pub fn error_message(&self) -> Option<String> {
    match self {
      Self::Found(body) => body.get("error").map(|e| match e {
        Value::String(s) => s.clone(),
        other => other.to_string(),
      }),
      Self::Failed(message) => Some(message.clone()),
    }
  }

  pub const fn body(&self) -> Option<&Value> {
    match self {
      Self::Found(body) => Some(body),
      Self::Failed(_) => None,
    }
  }

  pub fn is_success(&self) -> bool {
    self.error_message().is_none()
  }
}

/// Results of one auto-mode run, in dispatch order.
#[derive(Debug, Default)]
pub struct ResultSet {
  entries: Vec<(SearchType, Outcome)>,
}

impl ResultSet {
  /// Records an outcome; a type seen before keeps its original position.
  pub fn insert(&mut self, search_type: SearchType, outcome: Outcome) {
    if let Some(slot) = self.entries.iter_mut().find(|(t, _)| *t == search_type)
    {
      slot.1 = outcome;
    } else {
      self.entries.push((search_type, outcome));
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (SearchType, &Outcome)> {
    self.entries.iter().map(|(t, o)| (*t, o))
  }

  pub fn summary(&self) -> Summary {
    let successful =
      self.entries.iter().filter(|(_, o)| o.is_success()).count();
    Summary {
      total: self.entries.len(),
      successful,
      failed: self.entries.len() - successful,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
  pub total: usize,
  pub successful: usize,
  pub failed: usize,
}

/// The query as it should be sent for `search_type`: phone lookups take
/// digits only, everything else is sent verbatim.
pub fn normalize_query(query: &str, search_type: SearchType) -> Cow<'_, str> {
  if search_type == SearchType::Phone {
    Cow::Owned(classifier::digits_only(query))
  } else {
    Cow::Borrowed(query)
  }
}

pub struct Orchestrator<'a, T: Transport + ?Sized> {
  transport: &'a T,
  format: OutputFormat,
  verbose: bool,
  delay: Duration,
}

impl<'a, T: Transport + ?Sized> Orchestrator<'a, T> {
  pub const fn new(transport: &'a T, format: OutputFormat) -> Self {
    Self {
      transport,
      format,
      verbose: false,
      delay: DEFAULT_DELAY,
    }
  }

  #[must_use]
  pub const fn verbose(mut self, verbose: bool) -> Self {
    self.verbose = verbose;
    self
  }

  /// Pause between consecutive auto-mode requests.
  #[must_use]
  pub const fn delay(mut self, delay: Duration) -> Self {
    self.delay = delay;
    self
  }

  async fn dispatch(
    &self,
    query: &str,
    search_type: SearchType,
  ) -> Result<Value, SearchError> {
    let query = normalize_query(query, search_type);
    debug!(%search_type, query = %query, "dispatching search");
    self.transport.search(&query, search_type).await
  }

  /// Runs a single search of an explicit type and prints the result.
  ///
  /// # Errors
  ///
  /// Returns the transport or API error unchanged; manual mode treats any
  /// failure as fatal.
  pub async fn run_manual(
    &self,
    query: &str,
    search_type: SearchType,
  ) -> Result<Value, SearchError> {
    if self.verbose {
      println!("Searching for '{query}' with type '{search_type}'...\n");
    }
    let result = self.dispatch(query, search_type).await?;
    println!("{}", output::format_result(&result, self.format, None));
    Ok(result)
  }

  /// Classifies `query` and runs every applicable search type.
  ///
  /// Returns `None` when the query could not be classified; no request is
  /// made in that case.
  pub async fn run_auto(&self, query: &str) -> Option<ResultSet> {
    let detections = classifier::detect(query);
    if detections.is_empty() {
      println!(
        "Could not detect query type. Please specify search type manually."
      );
      return None;
    }

    print_detections(query, &detections);
    let types = classifier::dispatch_list(&detections);
    let results = self.run_batch(query, &types).await;
    print_summary(&results, self.format);
    Some(results)
  }

  /// Runs `types` in order, waiting between requests. A failed search is
  /// recorded and the batch moves on.
  pub async fn run_batch(&self, query: &str, types: &[SearchType]) -> ResultSet {
    let mut results = ResultSet::default();

    for (i, &search_type) in types.iter().enumerate() {
      print!("\n[{}/{}] Searching {search_type}...", i + 1, types.len());
      flush_stdout();

      match self.dispatch(query, search_type).await {
        Ok(body) => {
          println!(" {}", style("✓ Success").green());
          if self.verbose || self.format != OutputFormat::Summary {
            println!(
              "\n{}",
              output::format_result(&body, self.format, Some(search_type))
            );
          }
          results.insert(search_type, Outcome::Found(body));
        }
        Err(e) => {
          println!(" {}", style(format!("✗ Failed: {e}")).red());
          results.insert(search_type, Outcome::Failed(e.to_string()));
        }
      }

      if i + 1 < types.len() {
        self.wait().await;
      }
    }

    results
  }

  async fn wait(&self) {
    debug!(delay_secs = self.delay.as_secs(), "waiting before next request");
    print!(
      "Waiting {} seconds before next request...",
      self.delay.as_secs()
    );
    flush_stdout();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
      ProgressStyle::with_template("{spinner} {elapsed}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    tokio::time::sleep(self.delay).await;
    spinner.finish_and_clear();
    println!(" done");
  }
}

// Progress lines end without a newline; a failed flush only delays them.
fn flush_stdout() {
  if let Err(e) = io::stdout().flush() {
    debug!(error = %e, "failed to flush stdout");
  }
}

fn print_detections(query: &str, detections: &[Detection]) {
  println!("\nAnalyzing query: '{query}'");
  println!("{RULE}");

  for detection in detections {
    println!(
      "\nDetected as {} {}",
      style(detection.category).bold(),
      style(detection.confidence.marks()).green()
    );
    if detection.category == Category::Phone {
      if let Some(cleaned) = &detection.cleaned_query {
        println!("Phone number will be searched as: {cleaned}");
      }
    }
    let names: Vec<&str> =
      detection.types.iter().map(|t| t.as_str()).collect();
    println!(
      "Will perform {} search(es): {}",
      names.len(),
      names.join(", ")
    );
  }

  println!("\n{RULE}");
}

fn print_summary(results: &ResultSet, format: OutputFormat) {
  let summary = results.summary();
  println!("\n{RULE}");
  println!("{}", style("SEARCH SUMMARY").bold());
  println!("{RULE}");
  println!("Total searches: {}", summary.total);
  println!("Successful: {}", style(summary.successful).green());
  println!("Failed: {}", style(summary.failed).red());

  if format == OutputFormat::Summary {
    println!("\nResults summary:");
    for line in result_lines(results) {
      println!("{line}");
    }
  }
}

/// One `• <type>: ...` line per search, in dispatch order.
fn result_lines(results: &ResultSet) -> Vec<String> {
  results
    .iter()
    .map(|(search_type, outcome)| match outcome.error_message() {
      Some(message) => format!("  • {search_type}: Failed - {message}"),
      None => format!(
        "  • {search_type}: Found {} result(s)",
        outcome.body().map_or(0, output::items_found)
      ),
    })
    .collect()
}
