//! Identifiers shared by the classifier, the orchestrator and the wire format.

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// A lookup category understood by the search API.
///
/// The kebab-case spelling is part of the wire format and must not change.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum SearchType {
  /// Search by exact email address
  Email,
  /// Search by email prefix (e.g. "test@")
  EmailPrefix,
  /// Search by username
  Username,
  /// Search by domain name
  Domain,
  /// Search by password
  Password,
  /// Search by phone number (non-digits are removed)
  Phone,
  /// Search ULP records by email
  UlpEmail,
  /// Search ULP records by URL
  UlpUrl,
  /// Search WHOIS records by email
  WhoisEmail,
  /// Search WHOIS records by domain
  WhoisDomain,
}

impl SearchType {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Email => "email",
      Self::EmailPrefix => "email-prefix",
      Self::Username => "username",
      Self::Domain => "domain",
      Self::Password => "password",
      Self::Phone => "phone",
      Self::UlpEmail => "ulp-email",
      Self::UlpUrl => "ulp-url",
      Self::WhoisEmail => "whois-email",
      Self::WhoisDomain => "whois-domain",
    }
  }
}

impl fmt::Display for SearchType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Semantic category the classifier can assign to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
  Email,
  EmailPrefix,
  Domain,
  Url,
  Phone,
  Username,
  Password,
}

impl Category {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Email => "email",
      Self::EmailPrefix => "email-prefix",
      Self::Domain => "domain",
      Self::Url => "url",
      Self::Phone => "phone",
      Self::Username => "username",
      Self::Password => "password",
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confidence {
  Low,
  Medium,
  High,
}

impl Confidence {
  /// Check marks shown next to a detection, one per confidence level.
  pub const fn marks(self) -> &'static str {
    match self {
      Self::Low => "✓",
      Self::Medium => "✓✓",
      Self::High => "✓✓✓",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_wire_spelling_matches_display() {
    let all = SearchType::value_variants();
    assert_eq!(all.len(), 10);
    for t in all {
      let json = serde_json::to_string(t).unwrap();
      assert_eq!(json, format!("\"{t}\""));
    }
  }

  #[test]
  fn test_cli_names_match_wire_spelling() {
    for t in SearchType::value_variants() {
      let parsed = SearchType::from_str(t.as_str(), false)
        .expect("CLI value should round-trip");
      assert_eq!(parsed, *t);
    }
    assert_eq!(
      SearchType::from_str("whois-domain", false).unwrap(),
      SearchType::WhoisDomain
    );
  }

  #[test]
  fn test_confidence_marks() {
    assert_eq!(Confidence::High.marks(), "✓✓✓");
    assert_eq!(Confidence::Medium.marks(), "✓✓");
    assert_eq!(Confidence::Low.marks(), "✓");
    assert!(Confidence::Low < Confidence::High);
  }
}
