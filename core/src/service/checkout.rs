// storefront/src/service/checkout.rs

//! Multi-item checkout for a client-held cart.
//!
//! Each line is placed as its own order, independently of the others. There is
//! no cross-line atomicity: some lines can be placed while others are rejected,
//! and the report says which.

use serde::Deserialize;
use tracing::{info, instrument};

use super::orders::OrderService;
use crate::error::{StorefrontError, StorefrontResult};
use crate::models::{Cart, NewOrder, OrderId, OrderStatus, ProductId};
use crate::validation;

/// A checkout submission: shared customer/delivery details plus the cart.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutRequest {
  pub cust_name: Option<String>,
  pub cust_phone: Option<String>,
  pub cust_email: Option<String>,
  pub location: Option<String>,
  #[serde(flatten)]
  pub cart: Cart,
}

#[derive(Debug)]
pub enum LineOutcome {
  Placed { order_id: OrderId },
  Rejected { error: StorefrontError },
}

#[derive(Debug)]
pub struct LineResult {
  pub product_id: ProductId,
  pub qty: i64,
  pub outcome: LineOutcome,
}

/// Per-line results, in cart order.
#[derive(Debug, Default)]
pub struct CheckoutReport {
  pub lines: Vec<LineResult>,
}

impl CheckoutReport {
  pub fn placed(&self) -> usize {
    self
      .lines
      .iter()
      .filter(|l| matches!(l.outcome, LineOutcome::Placed { .. }))
      .count()
  }

  pub fn rejected(&self) -> usize {
    self.lines.len() - self.placed()
  }

  pub fn all_placed(&self) -> bool {
    self.rejected() == 0
  }
}

#[derive(Clone)]
pub struct CheckoutService {
  orders: OrderService,
}

impl CheckoutService {
  pub fn new(orders: OrderService) -> Self {
    Self { orders }
  }

  /// Validates the shared details once, then places every cart line in turn.
  ///
  /// Fails as a whole only when the shared details are invalid or the cart is
  /// empty; per-line problems (bad qty, unknown product, insufficient stock,
  /// store failure) are reported in the line's outcome.
  #[instrument(name = "checkout_service::checkout", skip(self, request), fields(lines = request.cart.len()), err(Display))]
  pub async fn checkout(&self, request: &CheckoutRequest) -> StorefrontResult<CheckoutReport> {
    let customer = validation::validate_customer(
      request.cust_name.as_deref(),
      request.cust_phone.as_deref(),
      request.cust_email.as_deref(),
    )?;
    let location = validation::validate_location(request.location.as_deref())?;
    if request.cart.is_empty() {
      return Err(StorefrontError::validation("items", "cart is empty"));
    }

    let mut report = CheckoutReport::default();
    for line in &request.cart.items {
      let outcome = match validation::validate_qty(Some(line.qty)) {
        Err(error) => LineOutcome::Rejected { error },
        Ok(qty) => {
          let order = NewOrder {
            product_id: line.product_id,
            customer: customer.clone(),
            qty,
            location: location.clone(),
            status: OrderStatus::Pending,
          };
          match self.orders.place_validated(&order).await {
            Ok(order_id) => LineOutcome::Placed { order_id },
            Err(error) => LineOutcome::Rejected { error },
          }
        }
      };
      report.lines.push(LineResult {
        product_id: line.product_id,
        qty: line.qty,
        outcome,
      });
    }

    info!(
      placed = report.placed(),
      rejected = report.rejected(),
      "Checkout processed."
    );
    Ok(report)
  }
}
