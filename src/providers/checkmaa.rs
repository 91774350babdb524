//! HTTPS transport for the Checkmaa search API.

use super::Transport;
use crate::error::SearchError;
use crate::search_type::SearchType;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const API_URL: &str = "https://api.checkmaasystem.com/api/search";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
  query: &'a str,
  #[serde(rename = "type")]
  search_type: SearchType,
}

pub struct Client {
  http: reqwest::Client,
  api_key: String,
  base_url: String,
}

impl Client {
  /// Builds a client that authenticates with `api_key`.
  ///
  /// # Errors
  ///
  /// Returns an error if the underlying HTTP client cannot be constructed
  /// (e.g. the TLS backend fails to initialise).
  pub fn new(api_key: String) -> Result<Self> {
    let http = reqwest::Client::builder()
      .user_agent(format!("checkmaa/{}", env!("CARGO_PKG_VERSION")))
      .timeout(REQUEST_TIMEOUT)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self {
      http,
      api_key,
      base_url: API_URL.to_string(),
    })
  }

  /// Points the client at another endpoint (for testing with wiremock).
  #[cfg(test)]
  pub fn with_base_url(mut self, url: String) -> Self {
    self.base_url = url;
    self
  }
}

#[async_trait]
impl Transport for Client {
  async fn search(
    &self,
    query: &str,
    search_type: SearchType,
  ) -> Result<Value, SearchError> {
    debug!(%search_type, url = %self.base_url, "sending search request");

    let response = self
      .http
      .post(&self.base_url)
      .header("X-API-Key", &self.api_key)
      .header(CONTENT_TYPE, "application/json")
      .json(&SearchRequest { query, search_type })
      .send()
      .await?;

    let status = response.status();
    debug!(status = status.as_u16(), "search response received");

    if !status.is_success() {
      let body = response.text().await?;
      return Err(SearchError::Api {
        status: status.as_u16(),
        detail: error_detail(&body),
      });
    }

    Ok(response.json::<Value>().await?)
  }
}

/// Pulls a human-readable reason out of an error body: the `message` field
/// when the body is a JSON object carrying one, the raw text otherwise.
fn error_detail(body: &str) -> String {
  match serde_json::from_str::<Value>(body) {
    Ok(Value::Object(map)) => match map.get("message") {
      Some(Value::String(message)) => message.clone(),
      Some(other) => other.to_string(),
      None => body.to_string(),
    },
    _ => body.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use wiremock::matchers::{body_json, header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn test_client(server: &MockServer) -> Client {
    Client::new("test-key".to_string())
      .unwrap()
      .with_base_url(format!("{}/api/search", server.uri()))
  }

  #[tokio::test]
  async fn test_search_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/api/search"))
      .and(header("X-API-Key", "test-key"))
      .and(header("Content-Type", "application/json"))
      .and(body_json(json!({"query": "facebook.com", "type": "whois-domain"})))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(json!({"results": [{"registrar": "RegistrarSafe"}]})),
      )
      .expect(1)
      .mount(&server)
      .await;

    let body = test_client(&server)
      .search("facebook.com", SearchType::WhoisDomain)
      .await
      .unwrap();
    assert_eq!(body["results"][0]["registrar"], "RegistrarSafe");
  }

  #[tokio::test]
  async fn test_api_error_uses_message_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(
        ResponseTemplate::new(403)
          .set_body_json(json!({"message": "Invalid API key"})),
      )
      .mount(&server)
      .await;

    let err = test_client(&server)
      .search("admin@", SearchType::EmailPrefix)
      .await
      .unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "API Error 403: Invalid API key");
  }

  #[tokio::test]
  async fn test_api_error_falls_back_to_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(502).set_body_string("Bad gateway"))
      .mount(&server)
      .await;

    let err = test_client(&server)
      .search("john_doe123", SearchType::Username)
      .await
      .unwrap_err();
    assert_eq!(err.to_string(), "API Error 502: Bad gateway");
  }

  #[tokio::test]
  async fn test_network_error() {
    let client = Client::new("test-key".to_string())
      .unwrap()
      .with_base_url("http://127.0.0.1:1/api/search".to_string());

    let err = client.search("x", SearchType::Password).await.unwrap_err();
    assert!(matches!(err, SearchError::Network(_)));
    assert!(err.to_string().starts_with("Network Error: "));
  }

  #[test]
  fn test_error_detail() {
    assert_eq!(error_detail(r#"{"message":"Rate limited"}"#), "Rate limited");
    assert_eq!(error_detail(r#"{"message":42}"#), "42");
    assert_eq!(error_detail(r#"{"error":"nope"}"#), r#"{"error":"nope"}"#);
    assert_eq!(error_detail("plain text"), "plain text");
  }
}
