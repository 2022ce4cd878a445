// storefront/src/store/mod.rs

//! Data-access traits the services are written against.
//!
//! The traits are object safe so an application can hold an `Arc<dyn Store>` and
//! choose the backend at startup. `MemoryStore` lives here; the Postgres store
//! lives with the server.

use async_trait::async_trait;

use crate::error::StorefrontResult;
use crate::models::{Admin, NewAdmin, NewOrder, Order, OrderId, OrderStatus, Product, ProductId, ProductInput};

pub mod memory;

pub use memory::{FailPoint, MemoryStore};

#[async_trait]
pub trait CatalogStore: Send + Sync {
  async fn list_products(&self) -> StorefrontResult<Vec<Product>>;

  async fn get_product(&self, id: ProductId) -> StorefrontResult<Option<Product>>;

  async fn insert_product(&self, input: ProductInput) -> StorefrontResult<Product>;

  /// Replaces the product's fields. `input.image == None` keeps the stored image.
  /// Returns `None` when the product does not exist.
  ///
  /// Implementations must take the same row lock that `OrderTransaction::lock_product_stock`
  /// takes, so an admin stock edit cannot interleave with an in-flight order.
  async fn update_product(&self, id: ProductId, input: ProductInput) -> StorefrontResult<Option<Product>>;

  /// Returns `false` when nothing was deleted. Products referenced by orders are
  /// never deleted; that case fails with `StorefrontError::Conflict`.
  async fn delete_product(&self, id: ProductId) -> StorefrontResult<bool>;
}

/// One order-placement unit of work.
///
/// Nothing written through a transaction is visible until `commit` succeeds. A
/// transaction that is rolled back, fails, or is simply dropped leaves the
/// catalog and the order book exactly as they were.
#[async_trait]
pub trait OrderTransaction: Send {
  /// Reads the product's stock and holds its row lock until the transaction ends.
  /// `None` when the product does not exist.
  async fn lock_product_stock(&mut self, product_id: ProductId) -> StorefrontResult<Option<i32>>;

  async fn insert_order(&mut self, order: &NewOrder) -> StorefrontResult<OrderId>;

  async fn decrement_stock(&mut self, product_id: ProductId, qty: i32) -> StorefrontResult<()>;

  async fn commit(self: Box<Self>) -> StorefrontResult<()>;

  async fn rollback(self: Box<Self>) -> StorefrontResult<()>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
  async fn begin_order(&self) -> StorefrontResult<Box<dyn OrderTransaction>>;

  /// All orders, newest first (ties broken by id, descending).
  async fn list_orders(&self) -> StorefrontResult<Vec<Order>>;

  async fn get_order(&self, id: OrderId) -> StorefrontResult<Option<Order>>;

  /// Sets `status = next` only if the stored status is still `expected`.
  /// Returns whether the row was updated.
  async fn compare_and_set_status(
    &self,
    id: OrderId,
    expected: OrderStatus,
    next: OrderStatus,
  ) -> StorefrontResult<bool>;
}

#[async_trait]
pub trait AdminStore: Send + Sync {
  async fn find_admin_by_email(&self, email: &str) -> StorefrontResult<Option<Admin>>;

  /// Fails with `StorefrontError::Conflict` if the email is already registered.
  async fn insert_admin(&self, admin: NewAdmin) -> StorefrontResult<Admin>;
}

/// Everything the storefront needs from a backend.
pub trait Store: CatalogStore + OrderStore + AdminStore {}

impl<T: CatalogStore + OrderStore + AdminStore> Store for T {}
