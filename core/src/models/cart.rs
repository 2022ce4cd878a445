// storefront/src/models/cart.rs

//! The cart is owned by the client. The server only ever sees it as the value
//! passed into a single checkout call and never stores it.

use serde::{Deserialize, Serialize};

use super::product::ProductId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
  pub product_id: ProductId,
  /// Kept wide so that negative or oversized input reaches validation instead of
  /// failing deserialization.
  pub qty: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
  #[serde(default)]
  pub items: Vec<CartLine>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds `qty` of a product, merging with an existing line for the same product.
  pub fn add(&mut self, product_id: ProductId, qty: i64) -> &mut Self {
    match self.items.iter_mut().find(|line| line.product_id == product_id) {
      Some(line) => line.qty = line.qty.saturating_add(qty),
      None => self.items.push(CartLine { product_id, qty }),
    }
    self
  }

  pub fn remove(&mut self, product_id: ProductId) -> &mut Self {
    self.items.retain(|line| line.product_id != product_id);
    self
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }
}
