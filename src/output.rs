//! Rendering of API responses for the terminal.

use crate::search_type::SearchType;
use clap::ValueEnum;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
  /// Human-readable listing
  #[default]
  Pretty,
  /// Indented JSON
  Json,
  /// Compact JSON
  Raw,
  /// Only counts per search type (auto mode)
  Summary,
}

/// Renders one search result.
///
/// `summary` only changes behaviour at the batch level and renders like
/// `pretty` here.
pub fn format_result(
  result: &Value,
  format: OutputFormat,
  label: Option<SearchType>,
) -> String {
  match format {
    OutputFormat::Json => format!("{result:#}"),
    OutputFormat::Raw => result.to_string(),
    OutputFormat::Pretty | OutputFormat::Summary => pretty(result, label),
  }
}

fn pretty(result: &Value, label: Option<SearchType>) -> String {
  let Value::Object(map) = result else {
    return plain_text(result);
  };

  if let Some(error) = map.get("error") {
    return format!("Error: {}", plain_text(error));
  }

  let mut lines = Vec::new();
  if let Some(search_type) = label {
    lines.push(format!(
      "=== {} SEARCH ===",
      search_type.as_str().to_uppercase()
    ));
  }

  for (key, value) in map {
    match value {
      Value::Array(items) => {
        lines.push(format!("\n{}:", key.to_uppercase()));
        for item in items {
          let text = match item {
            Value::Object(fields) => flatten(fields),
            other => plain_text(other),
          };
          lines.push(format!("  - {text}"));
        }
      }
      Value::Object(fields) => {
        lines.push(format!("\n{}:", key.to_uppercase()));
        for (k, v) in fields {
          lines.push(format!("  {k}: {}", plain_text(v)));
        }
      }
      scalar => lines.push(format!("{key}: {}", plain_text(scalar))),
    }
  }

  lines.join("\n")
}

/// `key: value, key: value` on a single line.
fn flatten(fields: &Map<String, Value>) -> String {
  fields
    .iter()
    .map(|(k, v)| format!("{k}: {}", plain_text(v)))
    .collect::<Vec<_>>()
    .join(", ")
}

// Strings print without quotes; everything else as compact JSON.
fn plain_text(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

/// Number of records in a response: the summed length of its top-level
/// sequence fields.
pub fn items_found(result: &Value) -> usize {
  result.as_object().map_or(0, |map| {
    map.values().filter_map(Value::as_array).map(Vec::len).sum()
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn sample() -> Value {
    json!({
      "query": "facebook.com",
      "count": 2,
      "results": [
        {"email": "a@facebook.com", "source": "breach-1"},
        "loose-entry"
      ],
      "meta": {"took_ms": 12, "cached": false}
    })
  }

  #[test]
  fn test_json_output_parses_back() {
    let value = sample();
    let out = format_result(&value, OutputFormat::Json, None);
    assert!(out.contains("\n  \"query\""), "should be indented: {out}");
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed, value);
  }

  #[test]
  fn test_raw_output_is_single_line() {
    let value = sample();
    let out = format_result(&value, OutputFormat::Raw, None);
    assert!(!out.contains('\n'));
    assert_eq!(serde_json::from_str::<Value>(&out).unwrap(), value);
  }

  #[test]
  fn test_pretty_output() {
    let out = format_result(
      &sample(),
      OutputFormat::Pretty,
      Some(SearchType::WhoisDomain),
    );
    let expected = "=== WHOIS-DOMAIN SEARCH ===\n\
      query: facebook.com\n\
      count: 2\n\
      \n\
      RESULTS:\n  \
      - email: a@facebook.com, source: breach-1\n  \
      - loose-entry\n\
      \n\
      META:\n  \
      took_ms: 12\n  \
      cached: false";
    assert_eq!(out, expected);
  }

  #[test]
  fn test_pretty_without_label_has_no_header() {
    let out = format_result(&json!({"ok": true}), OutputFormat::Pretty, None);
    assert_eq!(out, "ok: true");
  }

  #[test]
  fn test_pretty_error() {
    let out = format_result(
      &json!({"error": "API Error 500: boom"}),
      OutputFormat::Pretty,
      Some(SearchType::Email),
    );
    assert_eq!(out, "Error: API Error 500: boom");
  }

  #[test]
  fn test_pretty_non_object() {
    assert_eq!(
      format_result(&json!("done"), OutputFormat::Pretty, None),
      "done"
    );
    assert_eq!(
      format_result(&json!([1, 2]), OutputFormat::Summary, None),
      "[1,2]"
    );
  }

  #[test]
  fn test_summary_renders_like_pretty() {
    let value = sample();
    assert_eq!(
      format_result(&value, OutputFormat::Summary, None),
      format_result(&value, OutputFormat::Pretty, None)
    );
  }

  #[test]
  fn test_items_found() {
    assert_eq!(items_found(&sample()), 2);
    assert_eq!(
      items_found(&json!({"a": [1, 2, 3], "b": [], "c": [true]})),
      4
    );
    assert_eq!(items_found(&json!({"total": 10})), 0);
    assert_eq!(items_found(&json!([1, 2])), 0);
  }
}
