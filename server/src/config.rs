// storefront_server/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
  Postgres,
  Memory,
}

impl FromStr for StorageBackend {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_ascii_lowercase().as_str() {
      "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
      "memory" => Ok(StorageBackend::Memory),
      other => Err(AppError::Config(format!(
        "Invalid STORAGE_BACKEND '{}': expected 'postgres' or 'memory'",
        other
      ))),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub storage_backend: StorageBackend,
  /// Required when `storage_backend` is `Postgres`.
  pub database_url: Option<String>,
  pub db_max_connections: u32,
  pub run_migrations: bool,
  // Insert demo products when the catalog is empty
  pub seed_db: bool,
  pub log_format: LogFormat,
  /// Origins allowed to call the API from a browser. `["*"]` allows any origin.
  pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source. `from_env` passes the process environment.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

    let parse_bool = |name: &str, default: &str| {
      get_or(name, default)
        .parse::<bool>()
        .map_err(|e| AppError::Config(format!("Invalid {} value: {}", name, e)))
    };

    let server_host = get_or("SERVER_HOST", "127.0.0.1");
    let server_port = get_or("SERVER_PORT", "5000")
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let storage_backend: StorageBackend = get_or("STORAGE_BACKEND", "postgres").parse()?;
    let database_url = lookup("DATABASE_URL");
    if storage_backend == StorageBackend::Postgres && database_url.is_none() {
      return Err(AppError::Config(
        "Missing environment variable 'DATABASE_URL' (required for the postgres backend)".to_string(),
      ));
    }

    let db_max_connections = get_or("DB_MAX_CONNECTIONS", "10")
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DB_MAX_CONNECTIONS: {}", e)))?;

    let run_migrations = parse_bool("RUN_MIGRATIONS", "true")?;
    let seed_db = parse_bool("SEED_DB", "false")?;

    let log_format = match get_or("LOG_FORMAT", "pretty").to_ascii_lowercase().as_str() {
      "pretty" => LogFormat::Pretty,
      "json" => LogFormat::Json,
      other => return Err(AppError::Config(format!("Invalid LOG_FORMAT '{}'", other))),
    };

    let cors_allowed_origins: Vec<String> = get_or("CORS_ALLOWED_ORIGIN", "*")
      .split(',')
      .map(|o| o.trim().trim_end_matches('/').to_string())
      .filter(|o| !o.is_empty())
      .collect();
    if let Some(bad) = cors_allowed_origins
      .iter()
      .find(|o| o.as_str() != "*" && !(o.starts_with("http://") || o.starts_with("https://")))
    {
      return Err(AppError::Config(format!(
        "Invalid CORS_ALLOWED_ORIGIN entry '{}': expected '*' or an http(s) origin",
        bad
      )));
    }

    // The database URL may carry credentials, so it is not logged.
    tracing::info!(
      host = %server_host,
      port = server_port,
      backend = ?storage_backend,
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      storage_backend,
      database_url,
      db_max_connections,
      run_migrations,
      seed_db,
      log_format,
      cors_allowed_origins,
    })
  }
}
