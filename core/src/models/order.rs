// storefront/src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::product::ProductId;
use crate::error::StorefrontError;

pub type OrderId = i64;

/// Fulfillment stage of an order. Advances `Pending -> Paid -> Delivered` and never regresses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderStatus {
  #[default]
  Pending,
  Paid,
  Delivered,
}

impl OrderStatus {
  /// The next stage. `Delivered` is terminal and maps to itself.
  pub fn advance(self) -> Self {
    match self {
      OrderStatus::Pending => OrderStatus::Paid,
      OrderStatus::Paid => OrderStatus::Delivered,
      OrderStatus::Delivered => OrderStatus::Delivered,
    }
  }

  pub fn is_terminal(self) -> bool {
    self == OrderStatus::Delivered
  }

  pub fn as_str(self) -> &'static str {
    match self {
      OrderStatus::Pending => "Pending",
      OrderStatus::Paid => "Paid",
      OrderStatus::Delivered => "Delivered",
    }
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for OrderStatus {
  type Err = StorefrontError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "Pending" => Ok(OrderStatus::Pending),
      "Paid" => Ok(OrderStatus::Paid),
      "Delivered" => Ok(OrderStatus::Delivered),
      other => Err(StorefrontError::validation(
        "status",
        format!("unknown order status '{}'", other),
      )),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
  pub id: OrderId,
  pub product_id: ProductId,
  pub cust_name: String,
  pub cust_phone: String,
  pub cust_email: Option<String>,
  pub qty: i32,
  pub location: String,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
}

/// Raw order submission as received from a caller. Every field is optional here
/// so that a missing field surfaces as a field-specific validation error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderRequest {
  pub cust_name: Option<String>,
  pub cust_phone: Option<String>,
  pub cust_email: Option<String>,
  pub qty: Option<i64>,
  pub location: Option<String>,
  /// Accepted for wire compatibility; new orders always start `Pending`.
  pub status: Option<String>,
}

/// Validated customer contact details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
  pub name: String,
  pub phone: String,
  pub email: Option<String>,
}

/// A validated order, ready to be written inside an order transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
  pub product_id: ProductId,
  pub customer: CustomerDetails,
  pub qty: i32,
  pub location: String,
  pub status: OrderStatus,
}
