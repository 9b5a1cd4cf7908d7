// core/src/query.rs

//! Builds store-agnostic search conditions from raw user queries.

/// Characters escaped before a query is used as a regular expression.
const REGEX_METACHARACTERS: &[char] = &[
  '-', '/', '\\', '^', '$', '*', '+', '?', '.', '(', ')', '|', '[', ']', '{', '}',
];

/// Sanitized queries at least this long use full-text matching instead of substrings.
pub const FULL_TEXT_MIN_CHARS: usize = 3;

/// Which fields a case-insensitive pattern is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFields {
  NameOrCategory,
  Name,
}

/// A filter over the product collection, interpreted by each store backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCondition {
  All,
  /// Relevance search over name, description and category; any term may
  /// match as a word prefix.
  FullText { query: String },
  /// Case-insensitive regular expression, already escaped.
  Pattern { pattern: String, fields: PatternFields },
  /// Exact category equality.
  Category(String),
}

/// Trims the query and backslash-escapes regex metacharacters.
pub fn sanitize_query(raw: &str) -> String {
  let trimmed = raw.trim();
  let mut escaped = String::with_capacity(trimmed.len());
  for ch in trimmed.chars() {
    if REGEX_METACHARACTERS.contains(&ch) {
      escaped.push('\\');
    }
    escaped.push(ch);
  }
  escaped
}

/// Chooses the search condition for a user query.
///
/// Blank queries match everything. Short queries (up to two characters after
/// sanitizing) match name or category as substrings; longer ones use the
/// full-text index.
pub fn build_search_condition(raw: Option<&str>) -> SearchCondition {
  let Some(raw) = raw.filter(|query| !query.trim().is_empty()) else {
    return SearchCondition::All;
  };
  let sanitized = sanitize_query(raw);
  if sanitized.chars().count() >= FULL_TEXT_MIN_CHARS {
    SearchCondition::FullText {
      query: raw.trim().to_string(),
    }
  } else {
    SearchCondition::Pattern {
      pattern: sanitized,
      fields: PatternFields::NameOrCategory,
    }
  }
}

/// Condition used by autocomplete: substring on the name only.
pub fn suggestion_condition(raw: &str) -> SearchCondition {
  SearchCondition::Pattern {
    pattern: sanitize_query(raw),
    fields: PatternFields::Name,
  }
}

/// Lower-cased alphanumeric words of `text`.
pub fn text_terms(text: &str) -> Vec<String> {
  text
    .split(|ch: char| !ch.is_alphanumeric())
    .filter(|word| !word.is_empty())
    .map(str::to_lowercase)
    .collect()
}

/// True when any query term prefixes any word of the given fields.
pub fn full_text_matches(terms: &[String], fields: &[&str]) -> bool {
  if terms.is_empty() {
    return false;
  }
  fields.iter().any(|field| {
    text_terms(field)
      .iter()
      .any(|word| terms.iter().any(|term| word.starts_with(term.as_str())))
  })
}
