use thiserror::Error;

/// Failure of a single search request.
#[derive(Debug, Error)]
pub enum SearchError {
  /// The API answered with a non-success status.
  #[error("API Error {status}: {detail}")]
  Api { status: u16, detail: String },

  /// The request never produced a usable response (connection, timeout,
  /// undecodable body).
  #[error("Network Error: {0}")]
  Network(#[from] reqwest::Error),
}

impl SearchError {
  pub const fn status(&self) -> Option<u16> {
    match self {
      Self::Api { status, .. } => Some(*status),
      Self::Network(_) => None,
    }
  }
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error(
    "API key required. Set CHECKMAA_API_KEY environment variable or use --api-key"
  )]
  MissingApiKey,
}
