// storefront/src/lib.rs

//! Storefront: the domain core of a small shop backend.
//!
//!  - A product catalog managed by admins.
//!  - Transactional order placement: stock is checked, the order recorded and
//!    the stock decremented as one unit, serialised per product, so stock never
//!    goes negative.
//!  - A linear order status workflow (`Pending -> Paid -> Delivered`).
//!  - Checkout of a client-held cart, one independent order per line.
//!
//! Services are written against the async traits in [`store`]; [`MemoryStore`]
//! is the in-process backend, SQL backends implement the same traits.

pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod validation;

pub use crate::error::{EntityKind, StorefrontError, StorefrontResult};
pub use crate::models::{
  Admin, AdminId, Cart, CartLine, CustomerDetails, NewAdmin, NewOrder, Order, OrderId, OrderRequest, OrderStatus,
  Product, ProductId, ProductInput,
};
pub use crate::service::{
  CatalogService, CheckoutReport, CheckoutRequest, CheckoutService, LineOutcome, LineResult, OrderService,
};
pub use crate::store::{AdminStore, CatalogStore, FailPoint, MemoryStore, OrderStore, OrderTransaction, Store};
