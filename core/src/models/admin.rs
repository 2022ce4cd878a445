// storefront/src/models/admin.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

pub type AdminId = i64;

#[derive(Debug, Clone, Serialize)]
pub struct Admin {
  pub id: AdminId,
  pub email: String,
  #[serde(skip_serializing)] // Never send password hash to client
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAdmin {
  pub email: String,
  pub password_hash: String,
}
