// storefront_server/src/lib.rs

//! HTTP front end for the storefront: configuration, the Postgres store,
//! admin accounts and the actix-web route table.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod web;

use std::sync::Arc;

use storefront::MemoryStore;
use tracing::{info, warn};

use crate::config::{AppConfig, StorageBackend};
use crate::db::PgStore;
use crate::errors::Result;
use crate::state::AppState;

/// Builds the configured store, prepares it (migrations, seed) and wires the services.
pub async fn build_state(config: Arc<AppConfig>) -> Result<AppState> {
  let state = match config.storage_backend {
    StorageBackend::Postgres => {
      let pool = db::connect_pool(&config).await?;
      if config.run_migrations {
        db::run_migrations(&pool).await?;
      }
      AppState::new(Arc::new(PgStore::new(pool)), config.clone())
    }
    StorageBackend::Memory => {
      warn!("Using the in-memory store; data is lost on shutdown.");
      AppState::new(Arc::new(MemoryStore::new()), config.clone())
    }
  };

  if config.seed_db {
    db::seed_demo_products(state.store.as_ref()).await?;
  }
  info!(backend = ?config.storage_backend, "Application state ready.");
  Ok(state)
}
