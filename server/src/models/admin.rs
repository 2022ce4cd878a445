// storefront_server/src/models/admin.rs

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use storefront::Admin;

#[derive(Debug, Clone, FromRow)]
pub struct AdminRow {
  pub id: i64,
  pub email: String,
  pub password_hash: String,
  pub created_at: DateTime<Utc>,
}

impl From<AdminRow> for Admin {
  fn from(row: AdminRow) -> Self {
    Admin {
      id: row.id,
      email: row.email,
      password_hash: row.password_hash,
      created_at: row.created_at,
    }
  }
}
