// storefront/src/store/memory.rs

//! In-process store.
//!
//! Order transactions follow the same discipline a relational store gives us:
//! `lock_product_stock` takes a per-product async row lock that is held until the
//! transaction ends, writes are buffered inside the transaction, and `commit`
//! applies them in one critical section. The state lock is a `parking_lot` mutex
//! and is never held across an `.await`.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{debug, warn};

use super::{AdminStore, CatalogStore, OrderStore, OrderTransaction};
use crate::error::{StorefrontError, StorefrontResult};
use crate::models::{
  Admin, AdminId, NewAdmin, NewOrder, Order, OrderId, OrderStatus, Product, ProductId, ProductInput,
};

/// A point inside an order transaction where `MemoryStore` can be told to fail once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
  LockStock,
  InsertOrder,
  DecrementStock,
  Commit,
}

#[derive(Default)]
struct MemoryState {
  products: BTreeMap<ProductId, Product>,
  orders: BTreeMap<OrderId, Order>,
  admins: BTreeMap<AdminId, Admin>,
  last_product_id: i64,
  last_order_id: i64,
  last_admin_id: i64,
  armed_failure: Option<FailPoint>,
}

fn next_id(last: &mut i64) -> i64 {
  *last += 1;
  *last
}

#[derive(Default)]
struct Inner {
  state: Mutex<MemoryState>,
  row_locks: Mutex<HashMap<ProductId, Arc<AsyncMutex<()>>>>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
  inner: Arc<Inner>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Makes the next transaction that reaches `point` fail with a store failure.
  pub fn fail_once_at(&self, point: FailPoint) {
    self.inner.state.lock().armed_failure = Some(point);
  }

  /// Current stock of a product, bypassing row locks.
  pub fn stock_of(&self, id: ProductId) -> Option<i32> {
    self.inner.state.lock().products.get(&id).map(|p| p.stock)
  }

  pub fn order_count(&self) -> usize {
    self.inner.state.lock().orders.len()
  }

  fn trip(&self, point: FailPoint) -> StorefrontResult<()> {
    let mut state = self.inner.state.lock();
    if state.armed_failure == Some(point) {
      state.armed_failure = None;
      warn!(?point, "memory store: injected failure");
      return Err(StorefrontError::store(anyhow::anyhow!("injected failure at {:?}", point)));
    }
    Ok(())
  }

  async fn lock_row(&self, id: ProductId) -> RowGuard {
    let lock = {
      let mut locks = self.inner.row_locks.lock();
      locks.entry(id).or_default().clone()
    };
    let guard = lock.lock_owned().await;
    RowGuard {
      id,
      inner: self.inner.clone(),
      guard: Some(guard),
    }
  }

  /// Number of rows that currently have a lock entry.
  pub fn row_lock_count(&self) -> usize {
    self.inner.row_locks.lock().len()
  }
}

/// A held row lock. On drop the row's mutex is forgotten once no other
/// transaction holds or waits for it, so the lock table only tracks live rows.
struct RowGuard {
  id: ProductId,
  inner: Arc<Inner>,
  guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for RowGuard {
  fn drop(&mut self) {
    // Waiters clone the Arc under this same lock, so the count below is exact.
    let mut locks = self.inner.row_locks.lock();
    drop(self.guard.take());
    if locks.get(&self.id).is_some_and(|m| Arc::strong_count(m) == 1) {
      locks.remove(&self.id);
    }
  }
}

#[async_trait]
impl CatalogStore for MemoryStore {
  async fn list_products(&self) -> StorefrontResult<Vec<Product>> {
    Ok(self.inner.state.lock().products.values().cloned().collect())
  }

  async fn get_product(&self, id: ProductId) -> StorefrontResult<Option<Product>> {
    Ok(self.inner.state.lock().products.get(&id).cloned())
  }

  async fn insert_product(&self, input: ProductInput) -> StorefrontResult<Product> {
    let mut state = self.inner.state.lock();
    let now = Utc::now();
    let product = Product {
      id: next_id(&mut state.last_product_id),
      name: input.name,
      price_cents: input.price_cents,
      description: input.description,
      category: input.category,
      image: input.image,
      stock: input.stock,
      created_at: now,
      updated_at: now,
    };
    state.products.insert(product.id, product.clone());
    Ok(product)
  }

  async fn update_product(&self, id: ProductId, input: ProductInput) -> StorefrontResult<Option<Product>> {
    let _row = self.lock_row(id).await;
    let mut state = self.inner.state.lock();
    let Some(product) = state.products.get_mut(&id) else {
      return Ok(None);
    };
    product.name = input.name;
    product.price_cents = input.price_cents;
    product.description = input.description;
    product.category = input.category;
    if input.image.is_some() {
      product.image = input.image;
    }
    product.stock = input.stock;
    product.updated_at = Utc::now();
    Ok(Some(product.clone()))
  }

  async fn delete_product(&self, id: ProductId) -> StorefrontResult<bool> {
    let _row = self.lock_row(id).await;
    let mut state = self.inner.state.lock();
    if state.orders.values().any(|o| o.product_id == id) {
      return Err(StorefrontError::Conflict(format!(
        "Product {} is referenced by existing orders",
        id
      )));
    }
    Ok(state.products.remove(&id).is_some())
  }
}

struct MemoryOrderTx {
  store: MemoryStore,
  row_guards: HashMap<ProductId, RowGuard>,
  pending_orders: Vec<(OrderId, NewOrder)>,
  pending_decrements: Vec<(ProductId, i32)>,
}

impl MemoryOrderTx {
  async fn ensure_locked(&mut self, product_id: ProductId) {
    if !self.row_guards.contains_key(&product_id) {
      let guard = self.store.lock_row(product_id).await;
      self.row_guards.insert(product_id, guard);
    }
  }

  fn pending_decrement_for(&self, product_id: ProductId) -> i32 {
    self
      .pending_decrements
      .iter()
      .filter(|(id, _)| *id == product_id)
      .map(|(_, qty)| *qty)
      .sum()
  }
}

#[async_trait]
impl OrderTransaction for MemoryOrderTx {
  async fn lock_product_stock(&mut self, product_id: ProductId) -> StorefrontResult<Option<i32>> {
    self.store.trip(FailPoint::LockStock)?;
    self.ensure_locked(product_id).await;
    let stock = self.store.inner.state.lock().products.get(&product_id).map(|p| p.stock);
    Ok(stock.map(|s| s - self.pending_decrement_for(product_id)))
  }

  async fn insert_order(&mut self, order: &NewOrder) -> StorefrontResult<OrderId> {
    self.store.trip(FailPoint::InsertOrder)?;
    let id = next_id(&mut self.store.inner.state.lock().last_order_id);
    self.pending_orders.push((id, order.clone()));
    Ok(id)
  }

  async fn decrement_stock(&mut self, product_id: ProductId, qty: i32) -> StorefrontResult<()> {
    self.store.trip(FailPoint::DecrementStock)?;
    self.ensure_locked(product_id).await;
    self.pending_decrements.push((product_id, qty));
    Ok(())
  }

  async fn commit(self: Box<Self>) -> StorefrontResult<()> {
    self.store.trip(FailPoint::Commit)?;
    let mut state = self.store.inner.state.lock();

    // Validate everything before touching anything, so a failed commit applies nothing.
    let mut totals: HashMap<ProductId, i32> = HashMap::new();
    for (id, qty) in &self.pending_decrements {
      *totals.entry(*id).or_default() += *qty;
    }
    for (id, total) in &totals {
      match state.products.get(id) {
        Some(p) if p.stock >= *total => {}
        Some(p) => {
          return Err(StorefrontError::store(anyhow::anyhow!(
            "commit would drive stock of product {} to {}",
            id,
            p.stock - total
          )))
        }
        None => {
          return Err(StorefrontError::store(anyhow::anyhow!(
            "product {} disappeared before commit",
            id
          )))
        }
      }
    }

    let now = Utc::now();
    for (id, total) in totals {
      if let Some(p) = state.products.get_mut(&id) {
        p.stock -= total;
        p.updated_at = now;
      }
    }
    for (id, new_order) in &self.pending_orders {
      let order = Order {
        id: *id,
        product_id: new_order.product_id,
        cust_name: new_order.customer.name.clone(),
        cust_phone: new_order.customer.phone.clone(),
        cust_email: new_order.customer.email.clone(),
        qty: new_order.qty,
        location: new_order.location.clone(),
        status: new_order.status,
        created_at: now,
      };
      state.orders.insert(*id, order);
    }
    debug!(orders = self.pending_orders.len(), "memory store: transaction committed");
    Ok(())
    // Row guards are released when `self` drops here.
  }

  async fn rollback(self: Box<Self>) -> StorefrontResult<()> {
    debug!(
      discarded_orders = self.pending_orders.len(),
      "memory store: transaction rolled back"
    );
    Ok(())
  }
}

#[async_trait]
impl OrderStore for MemoryStore {
  async fn begin_order(&self) -> StorefrontResult<Box<dyn OrderTransaction>> {
    Ok(Box::new(MemoryOrderTx {
      store: self.clone(),
      row_guards: HashMap::new(),
      pending_orders: Vec::new(),
      pending_decrements: Vec::new(),
    }))
  }

  async fn list_orders(&self) -> StorefrontResult<Vec<Order>> {
    let mut orders: Vec<Order> = self.inner.state.lock().orders.values().cloned().collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    Ok(orders)
  }

  async fn get_order(&self, id: OrderId) -> StorefrontResult<Option<Order>> {
    Ok(self.inner.state.lock().orders.get(&id).cloned())
  }

  async fn compare_and_set_status(
    &self,
    id: OrderId,
    expected: OrderStatus,
    next: OrderStatus,
  ) -> StorefrontResult<bool> {
    let mut state = self.inner.state.lock();
    match state.orders.get_mut(&id) {
      Some(order) if order.status == expected => {
        order.status = next;
        Ok(true)
      }
      _ => Ok(false),
    }
  }
}

#[async_trait]
impl AdminStore for MemoryStore {
  async fn find_admin_by_email(&self, email: &str) -> StorefrontResult<Option<Admin>> {
    let state = self.inner.state.lock();
    Ok(state.admins.values().find(|a| a.email.eq_ignore_ascii_case(email)).cloned())
  }

  async fn insert_admin(&self, admin: NewAdmin) -> StorefrontResult<Admin> {
    let mut state = self.inner.state.lock();
    if state.admins.values().any(|a| a.email.eq_ignore_ascii_case(&admin.email)) {
      return Err(StorefrontError::Conflict("Admin already exists".to_string()));
    }
    let created = Admin {
      id: next_id(&mut state.last_admin_id),
      email: admin.email,
      password_hash: admin.password_hash,
      created_at: Utc::now(),
    };
    state.admins.insert(created.id, created.clone());
    Ok(created)
  }
}
