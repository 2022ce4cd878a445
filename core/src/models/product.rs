// storefront/src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ProductId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  /// Exchanged as a decimal `price`, e.g. `12.5`.
  #[serde(rename = "price", with = "super::money")]
  pub price_cents: i64,
  pub description: Option<String>,
  pub category: Option<String>,
  /// Reference to an asset held by the upload collaborator; never interpreted here.
  pub image: Option<String>,
  pub stock: i32,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Admin-supplied product fields, used for both create and update.
///
/// On update, `image: None` keeps the stored reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
  pub name: String,
  #[serde(rename = "price", with = "super::money")]
  pub price_cents: i64,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub category: Option<String>,
  #[serde(default)]
  pub image: Option<String>,
  #[serde(default)]
  pub stock: i32,
}
