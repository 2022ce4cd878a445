// storefront/src/error.rs
use anyhow::Error as AnyhowError;
use std::fmt;
use thiserror::Error;

/// The kind of entity a `NotFound` error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
  Product,
  Order,
  Admin,
}

impl fmt::Display for EntityKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EntityKind::Product => f.write_str("Product"),
      EntityKind::Order => f.write_str("Order"),
      EntityKind::Admin => f.write_str("Admin"),
    }
  }
}

#[derive(Debug, Error)]
pub enum StorefrontError {
  /// Malformed or missing input. `field` is the wire name of the offending field.
  #[error("Invalid {field}: {reason}")]
  Validation { field: &'static str, reason: String },

  #[error("{entity} with id {id} not found")]
  NotFound { entity: EntityKind, id: i64 },

  #[error("Only {available} items available (requested {requested})")]
  InsufficientStock { requested: i32, available: i32 },

  #[error("Conflict: {0}")]
  Conflict(String),

  /// Connection loss, aborted transaction, serialization conflict, ...
  /// The operation left no partial effect and may be retried from scratch.
  #[error("Store failure: {source}")]
  Store {
    #[source]
    source: AnyhowError,
  },
}

impl StorefrontError {
  pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
    StorefrontError::Validation {
      field,
      reason: reason.into(),
    }
  }

  pub fn not_found(entity: EntityKind, id: i64) -> Self {
    StorefrontError::NotFound { entity, id }
  }

  pub fn store(source: impl Into<AnyhowError>) -> Self {
    StorefrontError::Store { source: source.into() }
  }

  /// Stable machine-readable name of the error kind.
  pub fn kind(&self) -> &'static str {
    match self {
      StorefrontError::Validation { .. } => "validation",
      StorefrontError::NotFound { .. } => "not_found",
      StorefrontError::InsufficientStock { .. } => "insufficient_stock",
      StorefrontError::Conflict(_) => "conflict",
      StorefrontError::Store { .. } => "store_failure",
    }
  }

  /// Only infrastructure failures are worth retrying; everything else is terminal
  /// and must be corrected by the caller.
  pub fn is_retryable(&self) -> bool {
    matches!(self, StorefrontError::Store { .. })
  }
}

// Lets store implementations use `?` on anyhow-returning helpers.
impl From<AnyhowError> for StorefrontError {
  fn from(err: AnyhowError) -> Self {
    StorefrontError::Store { source: err }
  }
}

pub type StorefrontResult<T, E = StorefrontError> = std::result::Result<T, E>;
