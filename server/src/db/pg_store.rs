// storefront_server/src/db/pg_store.rs

//! Postgres implementation of the storefront store traits.
//!
//! Order placement runs in one sqlx transaction. `SELECT ... FOR UPDATE` takes the
//! product's row lock, so concurrent orders for the same product are serialised
//! at the stock check; orders for different products do not block each other.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use storefront::{
  Admin, AdminStore, CatalogStore, NewAdmin, NewOrder, Order, OrderId, OrderStatus, OrderStore, OrderTransaction,
  Product, ProductId, ProductInput, StorefrontError, StorefrontResult,
};
use tracing::{debug, instrument};

use crate::models::{AdminRow, OrderRow, ProductRow};

const PRODUCT_COLUMNS: &str = "id, name, price_cents, description, category, image, stock, created_at, updated_at";
const ORDER_COLUMNS: &str = "id, product_id, cust_name, cust_phone, cust_email, qty, location, status, created_at";

fn store_err(e: sqlx::Error) -> StorefrontError {
  StorefrontError::store(e)
}

#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }
}

#[async_trait]
impl CatalogStore for PgStore {
  #[instrument(name = "pg_store::list_products", skip(self), err(Display))]
  async fn list_products(&self) -> StorefrontResult<Vec<Product>> {
    let rows: Vec<ProductRow> = sqlx::query_as(&format!("SELECT {} FROM products ORDER BY id ASC", PRODUCT_COLUMNS))
      .fetch_all(&self.pool)
      .await
      .map_err(store_err)?;
    Ok(rows.into_iter().map(Product::from).collect())
  }

  async fn get_product(&self, id: ProductId) -> StorefrontResult<Option<Product>> {
    let row: Option<ProductRow> = sqlx::query_as(&format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(store_err)?;
    Ok(row.map(Product::from))
  }

  async fn insert_product(&self, input: ProductInput) -> StorefrontResult<Product> {
    let row: ProductRow = sqlx::query_as(&format!(
      "INSERT INTO products (name, price_cents, description, category, image, stock) \
       VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
      PRODUCT_COLUMNS
    ))
    .bind(&input.name)
    .bind(input.price_cents)
    .bind(&input.description)
    .bind(&input.category)
    .bind(&input.image)
    .bind(input.stock)
    .fetch_one(&self.pool)
    .await
    .map_err(store_err)?;
    Ok(row.into())
  }

  // An UPDATE takes the row lock itself, so this serialises with in-flight orders.
  async fn update_product(&self, id: ProductId, input: ProductInput) -> StorefrontResult<Option<Product>> {
    let row: Option<ProductRow> = sqlx::query_as(&format!(
      "UPDATE products \
       SET name = $2, price_cents = $3, description = $4, category = $5, \
           image = COALESCE($6, image), stock = $7, updated_at = NOW() \
       WHERE id = $1 RETURNING {}",
      PRODUCT_COLUMNS
    ))
    .bind(id)
    .bind(&input.name)
    .bind(input.price_cents)
    .bind(&input.description)
    .bind(&input.category)
    .bind(&input.image)
    .bind(input.stock)
    .fetch_optional(&self.pool)
    .await
    .map_err(store_err)?;
    Ok(row.map(Product::from))
  }

  async fn delete_product(&self, id: ProductId) -> StorefrontResult<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await;
    match result {
      Ok(done) => Ok(done.rows_affected() == 1),
      Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => Err(StorefrontError::Conflict(format!(
        "Product {} is referenced by existing orders",
        id
      ))),
      Err(e) => Err(store_err(e)),
    }
  }
}

pub struct PgOrderTx {
  tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl OrderTransaction for PgOrderTx {
  async fn lock_product_stock(&mut self, product_id: ProductId) -> StorefrontResult<Option<i32>> {
    sqlx::query_scalar::<_, i32>("SELECT stock FROM products WHERE id = $1 FOR UPDATE")
      .bind(product_id)
      .fetch_optional(&mut *self.tx)
      .await
      .map_err(store_err)
  }

  async fn insert_order(&mut self, order: &NewOrder) -> StorefrontResult<OrderId> {
    sqlx::query_scalar::<_, i64>(
      "INSERT INTO orders (product_id, cust_name, cust_phone, cust_email, qty, location, status) \
       VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
    )
    .bind(order.product_id)
    .bind(&order.customer.name)
    .bind(&order.customer.phone)
    .bind(&order.customer.email)
    .bind(order.qty)
    .bind(&order.location)
    .bind(order.status.as_str())
    .fetch_one(&mut *self.tx)
    .await
    .map_err(store_err)
  }

  async fn decrement_stock(&mut self, product_id: ProductId, qty: i32) -> StorefrontResult<()> {
    let done = sqlx::query("UPDATE products SET stock = stock - $1, updated_at = NOW() WHERE id = $2")
      .bind(qty)
      .bind(product_id)
      .execute(&mut *self.tx)
      .await
      .map_err(store_err)?;
    if done.rows_affected() != 1 {
      return Err(StorefrontError::store(anyhow::anyhow!(
        "stock update for product {} touched {} rows",
        product_id,
        done.rows_affected()
      )));
    }
    Ok(())
  }

  async fn commit(self: Box<Self>) -> StorefrontResult<()> {
    self.tx.commit().await.map_err(store_err)
  }

  async fn rollback(self: Box<Self>) -> StorefrontResult<()> {
    debug!("Rolling back order transaction.");
    self.tx.rollback().await.map_err(store_err)
  }
}

#[async_trait]
impl OrderStore for PgStore {
  async fn begin_order(&self) -> StorefrontResult<Box<dyn OrderTransaction>> {
    let tx = self.pool.begin().await.map_err(store_err)?;
    Ok(Box::new(PgOrderTx { tx }))
  }

  #[instrument(name = "pg_store::list_orders", skip(self), err(Display))]
  async fn list_orders(&self) -> StorefrontResult<Vec<Order>> {
    let rows: Vec<OrderRow> = sqlx::query_as(&format!(
      "SELECT {} FROM orders ORDER BY created_at DESC, id DESC",
      ORDER_COLUMNS
    ))
    .fetch_all(&self.pool)
    .await
    .map_err(store_err)?;
    rows.into_iter().map(Order::try_from).collect()
  }

  async fn get_order(&self, id: OrderId) -> StorefrontResult<Option<Order>> {
    let row: Option<OrderRow> = sqlx::query_as(&format!("SELECT {} FROM orders WHERE id = $1", ORDER_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(store_err)?;
    row.map(Order::try_from).transpose()
  }

  async fn compare_and_set_status(
    &self,
    id: OrderId,
    expected: OrderStatus,
    next: OrderStatus,
  ) -> StorefrontResult<bool> {
    let done = sqlx::query("UPDATE orders SET status = $3 WHERE id = $1 AND status = $2")
      .bind(id)
      .bind(expected.as_str())
      .bind(next.as_str())
      .execute(&self.pool)
      .await
      .map_err(store_err)?;
    Ok(done.rows_affected() == 1)
  }
}

#[async_trait]
impl AdminStore for PgStore {
  async fn find_admin_by_email(&self, email: &str) -> StorefrontResult<Option<Admin>> {
    let row: Option<AdminRow> =
      sqlx::query_as("SELECT id, email, password_hash, created_at FROM admins WHERE LOWER(email) = LOWER($1)")
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;
    Ok(row.map(Admin::from))
  }

  async fn insert_admin(&self, admin: NewAdmin) -> StorefrontResult<Admin> {
    let result: Result<AdminRow, sqlx::Error> = sqlx::query_as(
      "INSERT INTO admins (email, password_hash) VALUES ($1, $2) RETURNING id, email, password_hash, created_at",
    )
    .bind(&admin.email)
    .bind(&admin.password_hash)
    .fetch_one(&self.pool)
    .await;
    match result {
      Ok(row) => Ok(row.into()),
      Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
        Err(StorefrontError::Conflict("Admin already exists".to_string()))
      }
      Err(e) => Err(store_err(e)),
    }
  }
}
