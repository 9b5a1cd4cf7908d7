// server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use catalog::CatalogError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  /// A catalog operation failed. `message` names the operation for the client.
  #[error("{message}: {source}")]
  Catalog {
    message: &'static str,
    #[source]
    source: CatalogError,
  },
}

impl AppError {
  /// For `map_err`: wraps a catalog failure with the operation's message.
  pub fn catalog(message: &'static str) -> impl FnOnce(CatalogError) -> AppError {
    move |source| AppError::Catalog { message, source }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
  }

  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"message": "Configuration issue", "error": m}))
      }
      AppError::Catalog { message, source } => {
        HttpResponse::InternalServerError().json(json!({"message": message, "error": source.to_string()}))
      }
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
