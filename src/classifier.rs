//! Guesses what kind of value a free-form query is.
//!
//! Every pattern test runs in a fixed order and every match is kept, so a
//! single query may yield several detections (e.g. a dotted numeric string is
//! both host-like and phone-like). `username` and `password` are fallbacks that
//! only apply when nothing earlier matched.

use crate::search_type::{Category, Confidence, SearchType};
use once_cell::sync::Lazy;
use regex::Regex;

static RE_EMAIL: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[\w.%+-]+@[\w.-]+\.[A-Za-z]{2,}$").unwrap());
static RE_EMAIL_PREFIX: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[\w.%+-]+@$").unwrap());
static RE_DOMAIN: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^([A-Za-z0-9-]+\.)*[A-Za-z0-9-]+\.[A-Za-z]{2,}$").unwrap()
});
// Only anchored at the start: anything may follow the host.
static RE_URL: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^(https?://)?([A-Za-z0-9-]+\.)*[A-Za-z0-9-]+\.[A-Za-z]{2,}")
    .unwrap()
});
static RE_PHONE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"^[+]?[(]?[0-9]{1,4}[)]?[-\s.]?[(]?[0-9]{1,4}[)]?[-\s.]?[0-9]{1,4}[-\s.]?[0-9]{1,9}$",
  )
  .unwrap()
});
static RE_USERNAME: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]{3,30}$").unwrap());

/// Path-like suffixes that disqualify an otherwise host-shaped query.
const NON_HOST_EXTENSIONS: [&str; 5] = [".html", ".php", ".jpg", ".png", ".pdf"];

/// Digit count range accepted as a phone number regardless of punctuation.
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;

const MIN_PASSWORD_LEN: usize = 4;

/// One category the classifier believes a query belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
  pub category: Category,
  /// Search types worth running for this category, in dispatch order.
  pub types: Vec<SearchType>,
  pub confidence: Confidence,
  /// Digits-only form of the query; set for phone detections.
  pub cleaned_query: Option<String>,
}

impl Detection {
  fn new(
    category: Category,
    types: &[SearchType],
    confidence: Confidence,
  ) -> Self {
    Self {
      category,
      types: types.to_vec(),
      confidence,
      cleaned_query: None,
    }
  }
}

/// Strips everything except ASCII digits.
pub fn digits_only(query: &str) -> String {
  query.chars().filter(char::is_ascii_digit).collect()
}

/// Classifies `query`, returning detections in precedence order.
///
/// An empty result means the query could not be classified at all; callers
/// must treat that as a normal outcome.
pub fn detect(query: &str) -> Vec<Detection> {
  let query = query.trim();
  let mut detected = Vec::new();

  if RE_EMAIL.is_match(query) {
    detected.push(Detection::new(
      Category::Email,
      &[SearchType::Email, SearchType::UlpEmail, SearchType::WhoisEmail],
      Confidence::High,
    ));
  } else if RE_EMAIL_PREFIX.is_match(query) {
    detected.push(Detection::new(
      Category::EmailPrefix,
      &[SearchType::EmailPrefix],
      Confidence::High,
    ));
  }

  if is_domain(query) {
    detected.push(Detection::new(
      Category::Domain,
      &[SearchType::Domain, SearchType::WhoisDomain, SearchType::Password],
      Confidence::High,
    ));
  }

  if RE_URL.is_match(query) && query.contains('/') {
    detected.push(Detection::new(
      Category::Url,
      &[SearchType::UlpUrl],
      Confidence::High,
    ));
  }

  let digits = digits_only(query);
  if RE_PHONE.is_match(query) || PHONE_DIGITS.contains(&digits.len()) {
    let confidence = if digits.len() < 10 {
      Confidence::Medium
    } else {
      Confidence::High
    };
    let mut phone =
      Detection::new(Category::Phone, &[SearchType::Phone], confidence);
    phone.cleaned_query = Some(digits);
    detected.push(phone);
  }

  if detected.is_empty() && RE_USERNAME.is_match(query) {
    detected.push(Detection::new(
      Category::Username,
      &[SearchType::Username],
      Confidence::Medium,
    ));
  }

  if detected.is_empty() && query.chars().count() >= MIN_PASSWORD_LEN {
    detected.push(Detection::new(
      Category::Password,
      &[SearchType::Password],
      Confidence::Low,
    ));
  }

  detected
}

fn is_domain(query: &str) -> bool {
  !query.contains('@')
    && RE_DOMAIN.is_match(query)
    && !NON_HOST_EXTENSIONS.iter().any(|ext| query.ends_with(ext))
}

/// Flattens detections into the list of searches to run, dropping repeats
/// while keeping the position of each type's first occurrence.
pub fn dispatch_list(detections: &[Detection]) -> Vec<SearchType> {
  let mut types: Vec<SearchType> = Vec::new();
  for t in detections.iter().flat_map(|d| d.types.iter().copied()) {
    if !types.contains(&t) {
      types.push(t);
    }
  }
  types
}
