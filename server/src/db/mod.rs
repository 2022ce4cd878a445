// storefront_server/src/db/mod.rs

pub mod pg_store;

pub use pg_store::PgStore;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use storefront::{CatalogStore, ProductInput};
use tracing::{info, instrument};

#[instrument(name = "db::connect_pool", skip(config), err(Display))]
pub async fn connect_pool(config: &AppConfig) -> Result<PgPool> {
  let url = config
    .database_url
    .as_deref()
    .ok_or_else(|| AppError::Config("DATABASE_URL is not set".to_string()))?;
  let pool = PgPoolOptions::new()
    .max_connections(config.db_max_connections)
    .connect(url)
    .await?;
  info!(max_connections = config.db_max_connections, "Database pool created.");
  Ok(pool)
}

#[instrument(name = "db::run_migrations", skip(pool), err(Display))]
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
  sqlx::migrate!("./migrations").run(pool).await?;
  info!("Database migrations applied.");
  Ok(())
}

fn demo_products() -> Vec<ProductInput> {
  let product = |name: &str, price_cents: i64, category: &str, stock: i32, description: &str| ProductInput {
    name: name.to_string(),
    price_cents,
    description: Some(description.to_string()),
    category: Some(category.to_string()),
    image: None,
    stock,
  };
  vec![
    product("Agaseke Basket", 2500, "Crafts", 12, "Hand-woven sisal basket with lid"),
    product("Imigongo Panel", 4800, "Art", 5, "Geometric cow-dung relief panel"),
    product("Kitenge Tote", 1800, "Fashion", 20, "Cotton tote in printed kitenge fabric"),
    product("Clay Water Pot", 3200, "Home", 8, "Fired clay pot, keeps water cool"),
  ]
}

/// Inserts a handful of demo products, but only into an empty catalog.
/// Returns how many were inserted.
#[instrument(name = "db::seed_demo_products", skip(store), err(Display))]
pub async fn seed_demo_products<S: CatalogStore + ?Sized>(store: &S) -> Result<usize> {
  if !store.list_products().await?.is_empty() {
    info!("Catalog already has products, skipping seed.");
    return Ok(0);
  }
  let demo = demo_products();
  let count = demo.len();
  for input in demo {
    store.insert_product(input).await?;
  }
  info!(count, "Seeded demo products.");
  Ok(count)
}
