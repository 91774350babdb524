//! Transports that carry a search request to the lookup API.

pub mod checkmaa;

use crate::error::SearchError;
use crate::search_type::SearchType;
use async_trait::async_trait;
use serde_json::Value;

/// Sends one query of one type and returns the decoded response body.
///
/// Implementations receive the query exactly as it should appear on the wire;
/// any per-type normalization has already been applied by the caller.
#[async_trait]
pub trait Transport: Send + Sync {
  async fn search(
    &self,
    query: &str,
    search_type: SearchType,
  ) -> Result<Value, SearchError>;
}
