// storefront_server/src/models/product.rs

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use storefront::Product;

#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
  pub id: i64,
  pub name: String,
  pub price_cents: i64,
  pub description: Option<String>, // Description can be optional
  pub category: Option<String>,
  pub image: Option<String>,
  pub stock: i32,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
  fn from(row: ProductRow) -> Self {
    Product {
      id: row.id,
      name: row.name,
      price_cents: row.price_cents,
      description: row.description,
      category: row.category,
      image: row.image,
      stock: row.stock,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}
