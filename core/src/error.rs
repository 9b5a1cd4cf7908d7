// core/src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Invalid search pattern: {0}")]
  Pattern(#[from] regex::Error),

  #[error("Invalid product field '{field}': {reason}")]
  InvalidProduct { field: &'static str, reason: String },

  #[error("HTTP request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("Unexpected status {status} from {endpoint}")]
  UnexpectedStatus { endpoint: String, status: u16 },

  #[error("Internal catalog error: {0}")]
  Internal(String),
}

impl CatalogError {
  pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
    CatalogError::InvalidProduct {
      field,
      reason: reason.into(),
    }
  }
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
