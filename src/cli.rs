use crate::output::OutputFormat;
use crate::search_type::SearchType;
use clap::{ArgGroup, Parser};

const AFTER_HELP: &str = "\
SEARCH MODES:
  1. Manual mode: specify the exact search type with -t
  2. Auto mode: detect the query type and search every relevant type

EXAMPLES:
  checkmaa -q test@gmail.com -t email
  checkmaa -q 1234567890 -t phone        # non-digits are removed
  checkmaa -q facebook.com --auto
  checkmaa -q \"+1 (234) 567-8900\" --auto  # searched as 12345678900
  checkmaa -q admin@example.com --auto --delay 10

ENVIRONMENT:
  Set CHECKMAA_API_KEY to avoid passing --api-key each time.";

#[derive(Parser, Debug, Clone)]
#[command(name = "checkmaa", version)]
#[command(
  about = "Search emails, domains, phones, usernames and passwords via the Checkmaa API.",
  long_about = "A command-line client for the Checkmaa lookup API. Run a single search of an explicit type, or let --auto detect what the query is and run every relevant search type.",
  after_help = AFTER_HELP
)]
#[command(group(
  ArgGroup::new("mode")
    .required(true)
    .args(["search_type", "auto"])
))]
pub struct Cli {
  /// The value to search for.
  #[arg(short, long)]
  pub query: String,

  /// Type of search (not needed with --auto).
  #[arg(short = 't', long = "type", value_enum, value_name = "TYPE")]
  pub search_type: Option<SearchType>,

  /// Detect the query type and run all relevant searches.
  #[arg(long)]
  pub auto: bool,

  /// Seconds to wait between API calls in auto mode.
  #[arg(long, default_value_t = 5, value_name = "SECONDS")]
  pub delay: u64,

  /// API key.
  /// Overrides the `CHECKMAA_API_KEY` environment variable if both are set.
  #[arg(short = 'k', long = "api-key", value_name = "API_KEY")]
  pub api_key: Option<String>,

  /// Persist the --api-key value into the user config file.
  #[arg(long, requires = "api_key")]
  pub save_key: bool,

  /// Output format.
  #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
  pub format: OutputFormat,

  /// Verbose output.
  #[arg(short, long)]
  pub verbose: bool,
}
