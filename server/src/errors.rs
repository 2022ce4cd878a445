// storefront_server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::{json, Value};
use storefront::StorefrontError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Storefront(#[from] StorefrontError),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  /// Malformed request body or path that never reached validation.
  #[error("Bad Request: {0}")]
  BadRequest(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Migration Error: {0}")]
  Migrate(#[from] sqlx::migrate::MigrateError),

  #[error("Internal Server Error: {0}")]
  Internal(String), // For miscellaneous errors
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Storefront(e) => match e {
        StorefrontError::Validation { .. } | StorefrontError::InsufficientStock { .. } => StatusCode::BAD_REQUEST,
        StorefrontError::NotFound { .. } => StatusCode::NOT_FOUND,
        StorefrontError::Conflict(_) => StatusCode::CONFLICT,
        StorefrontError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
      },
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Migrate(_) | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    // Log the full error when it's turned into a response
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Responding with error");
    }

    let body = match self {
      AppError::Storefront(e) => storefront_error_body(e),
      AppError::Auth(m) => json!({"error": "auth", "message": m}),
      AppError::BadRequest(m) => json!({"error": "bad_request", "message": m}),
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Migrate(_) | AppError::Internal(_) => {
        json!({"error": "internal", "message": "Internal server error"})
      }
    };

    HttpResponse::build(status).json(body)
  }
}

/// JSON body for a domain error. Checkout reuses it for rejected lines.
pub fn storefront_error_body(e: &StorefrontError) -> Value {
  match e {
    StorefrontError::Validation { field, .. } => {
      json!({"error": e.kind(), "field": field, "message": e.to_string()})
    }
    StorefrontError::InsufficientStock { requested, available } => json!({
      "error": e.kind(),
      "message": e.to_string(),
      "requested": requested,
      "available": available,
    }),
    StorefrontError::NotFound { .. } | StorefrontError::Conflict(_) => {
      json!({"error": e.kind(), "message": e.to_string()})
    }
    // Infrastructure detail stays in the logs.
    StorefrontError::Store { .. } => json!({"error": e.kind(), "message": "Internal server error"}),
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
