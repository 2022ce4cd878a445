// tests/common/mod.rs
#![allow(dead_code)] // Each test crate uses a different subset of these helpers

use once_cell::sync::Lazy;
use std::sync::Arc;
use storefront::{
  CatalogService, CatalogStore, CheckoutService, MemoryStore, OrderRequest, OrderService, Product, ProductInput, Store,
};
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Another test binary may have installed a subscriber already
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// A memory store plus services wired to it, the way an application wires them.
pub struct Shop {
  pub store: MemoryStore,
  pub orders: OrderService,
  pub catalog: CatalogService,
  pub checkout: CheckoutService,
}

pub fn shop() -> Shop {
  setup_tracing();
  let store = MemoryStore::new();
  let dyn_store: Arc<dyn Store> = Arc::new(store.clone());
  let orders = OrderService::new(dyn_store.clone());
  Shop {
    store,
    catalog: CatalogService::new(dyn_store),
    checkout: CheckoutService::new(orders.clone()),
    orders,
  }
}

impl Shop {
  pub async fn add_product(&self, name: &str, stock: i32) -> Product {
    self
      .store
      .insert_product(ProductInput {
        name: name.to_string(),
        price_cents: 2500,
        stock,
        ..Default::default()
      })
      .await
      .expect("insert product")
  }
}

pub fn valid_customer(qty: i64) -> OrderRequest {
  OrderRequest {
    cust_name: Some("Jean Mugisha".to_string()),
    cust_phone: Some("+250788123456".to_string()),
    cust_email: Some("jean@example.com".to_string()),
    qty: Some(qty),
    location: Some("Kigali".to_string()),
    status: Some("Pending".to_string()),
  }
}
