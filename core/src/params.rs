// core/src/params.rs

//! Parsing of raw query-string parameters into validated request values.
//!
//! Nothing here rejects input: unparsable numbers fall back to defaults and
//! out-of-range numbers are clamped, so every request gets a well-defined page.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 6;
pub const DEFAULT_TRENDING_LIMIT: u64 = 5;
pub const MAX_LIMIT: u64 = 100;
pub const SUGGESTION_LIMIT: u64 = 5;
pub const MIN_SUGGESTION_CHARS: usize = 2;

/// Parses an integer the way a lenient query-string reader would:
/// `"3"` and `"3.7"` give 3, anything else gives `None`.
fn parse_integer(raw: &str) -> Option<i64> {
  let trimmed = raw.trim();
  if let Ok(value) = trimmed.parse::<i64>() {
    return Some(value);
  }
  match trimmed.parse::<f64>() {
    Ok(value) if value.is_finite() => Some(value.trunc() as i64),
    _ => None,
  }
}

fn parse_clamped(name: &'static str, raw: Option<&str>, default: u64, min: u64, max: u64) -> u64 {
  let Some(raw) = raw else {
    return default;
  };
  match parse_integer(raw) {
    Some(value) => {
      let clamped = value.clamp(min as i64, max as i64) as u64;
      if clamped as i64 != value {
        debug!(parameter = name, requested = value, used = clamped, "Clamped query parameter.");
      }
      clamped
    }
    None => {
      debug!(parameter = name, raw = raw, used = default, "Unparsable query parameter, using default.");
      default
    }
  }
}

/// A normalized page request: `page >= 1`, `1 <= limit <= MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  pub page: u64,
  pub limit: u64,
}

impl Default for PageRequest {
  fn default() -> Self {
    Self {
      page: DEFAULT_PAGE,
      limit: DEFAULT_PAGE_SIZE,
    }
  }
}

impl PageRequest {
  pub fn new(page: u64, limit: u64) -> Self {
    Self {
      page: page.max(1),
      limit: limit.clamp(1, MAX_LIMIT),
    }
  }

  pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
    Self {
      page: parse_clamped("page", page, DEFAULT_PAGE, 1, i64::MAX as u64),
      limit: parse_clamped("limit", limit, DEFAULT_PAGE_SIZE, 1, MAX_LIMIT),
    }
  }

  /// Number of records before this page.
  pub fn skip(&self) -> u64 {
    (self.page - 1).saturating_mul(self.limit)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendingMetric {
  #[default]
  Views,
  Likes,
}

impl TrendingMetric {
  pub fn parse(raw: Option<&str>) -> Self {
    match raw.map(|value| value.trim().to_ascii_lowercase()) {
      None => TrendingMetric::Views,
      Some(value) if value.is_empty() || value == "views" => TrendingMetric::Views,
      Some(value) if value == "likes" => TrendingMetric::Likes,
      Some(other) => {
        warn!(metric = %other, "Unknown trending metric, falling back to views.");
        TrendingMetric::Views
      }
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      TrendingMetric::Views => "views",
      TrendingMetric::Likes => "likes",
    }
  }
}

impl fmt::Display for TrendingMetric {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendingRequest {
  pub metric: TrendingMetric,
  pub limit: u64,
}

impl Default for TrendingRequest {
  fn default() -> Self {
    Self {
      metric: TrendingMetric::Views,
      limit: DEFAULT_TRENDING_LIMIT,
    }
  }
}

impl TrendingRequest {
  pub fn new(metric: TrendingMetric, limit: u64) -> Self {
    Self {
      metric,
      limit: limit.clamp(1, MAX_LIMIT),
    }
  }

  pub fn parse(metric: Option<&str>, limit: Option<&str>) -> Self {
    Self {
      metric: TrendingMetric::parse(metric),
      limit: parse_clamped("limit", limit, DEFAULT_TRENDING_LIMIT, 1, MAX_LIMIT),
    }
  }
}

/// Category selection. `"all"` and blank values mean no filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
  #[default]
  All,
  Named(String),
}

impl CategoryFilter {
  pub fn parse(raw: Option<&str>) -> Self {
    match raw.map(str::trim) {
      None => CategoryFilter::All,
      Some(value) if value.is_empty() || value.eq_ignore_ascii_case("all") => CategoryFilter::All,
      Some(value) => CategoryFilter::Named(value.to_string()),
    }
  }

  pub fn as_name(&self) -> Option<&str> {
    match self {
      CategoryFilter::All => None,
      CategoryFilter::Named(name) => Some(name),
    }
  }

  /// Value used by the category selector (`"all"` for no filter).
  pub fn selector_value(&self) -> &str {
    self.as_name().unwrap_or("all")
  }
}
