// storefront_server/src/main.rs

use std::sync::Arc;

use actix_web::{web as actix_data, App, HttpServer};
use storefront_server::config::{AppConfig, LogFormat};
use storefront_server::web::{configure_app_routes, cors_middleware};
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
  // RUST_LOG overrides the default INFO level
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration
  match format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Pretty => builder.init(),
  }
}

fn to_io(e: impl std::fmt::Display) -> std::io::Error {
  std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Config comes first because it picks the log format; its errors go to stderr.
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      eprintln!("Failed to load application configuration: {}", e);
      return Err(to_io(e));
    }
  };
  init_tracing(app_config.log_format);
  tracing::info!("Starting storefront server...");

  let app_state = storefront_server::build_state(app_config.clone()).await.map_err(|e| {
    tracing::error!(error = %e, "Failed to initialise application state.");
    to_io(e)
  })?;

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  let cors_origins = app_config.cors_allowed_origins.clone();
  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(cors_middleware(&cors_origins))
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
