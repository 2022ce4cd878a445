// storefront_server/src/models/order.rs

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use storefront::{Order, OrderStatus, StorefrontError};

#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
  pub id: i64,
  pub product_id: i64,
  pub cust_name: String,
  pub cust_phone: String,
  pub cust_email: Option<String>,
  pub qty: i32,
  pub location: String,
  // Stored as TEXT, constrained by a CHECK in the schema.
  pub status: String,
  pub created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
  type Error = StorefrontError;

  fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
    let status: OrderStatus = row.status.parse().map_err(|_| {
      StorefrontError::store(anyhow::anyhow!(
        "order {} has unknown status '{}' in the database",
        row.id,
        row.status
      ))
    })?;
    Ok(Order {
      id: row.id,
      product_id: row.product_id,
      cust_name: row.cust_name,
      cust_phone: row.cust_phone,
      cust_email: row.cust_email,
      qty: row.qty,
      location: row.location,
      status,
      created_at: row.created_at,
    })
  }
}
