// storefront_server/src/state.rs
use crate::config::AppConfig;
use crate::services::AdminService;
use std::sync::Arc;
use storefront::{CatalogService, CheckoutService, OrderService, Store};

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn Store>,
  pub orders: OrderService,
  pub catalog: CatalogService,
  pub checkout: CheckoutService,
  pub admins: AdminService,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  /// Wires every service to the same backend.
  pub fn new<S: Store + 'static>(store: Arc<S>, config: Arc<AppConfig>) -> Self {
    let dyn_store: Arc<dyn Store> = store.clone();
    let orders = OrderService::new(dyn_store.clone());
    Self {
      catalog: CatalogService::new(dyn_store.clone()),
      checkout: CheckoutService::new(orders.clone()),
      admins: AdminService::new(store),
      orders,
      store: dyn_store,
      config,
    }
  }
}
