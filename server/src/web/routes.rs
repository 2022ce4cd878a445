// storefront_server/src/web/routes.rs

use actix_cors::Cors;
use actix_web::http::{header, Method};
use actix_web::{error, web, HttpRequest, HttpResponse};

use crate::errors::AppError;
use crate::web::handlers::{admin_handlers, checkout_handlers, order_handlers, product_handlers};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Unparseable bodies get the same JSON error shape as validation failures.
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
    AppError::BadRequest(format!("Invalid JSON body: {}", err)).into()
  })
}

fn path_config() -> web::PathConfig {
  web::PathConfig::default().error_handler(|err: error::PathError, _req: &HttpRequest| {
    AppError::BadRequest(format!("Invalid path parameter: {}", err)).into()
  })
}

/// CORS for browser clients served from another origin. `"*"` in `origins`
/// allows any origin.
pub fn cors_middleware(origins: &[String]) -> Cors {
  let cors = Cors::default()
    .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
    .allowed_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
    .max_age(60 * 60);
  if origins.iter().any(|o| o == "*") {
    return cors.allow_any_origin();
  }
  origins.iter().fold(cors, |cors, origin| cors.allowed_origin(origin))
}

// Paths stay at the root (no version prefix) so existing clients keep working.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(json_config())
    .app_data(path_config())
    .route("/health", web::get().to(health_check_handler))
    .service(
      web::scope("/products")
        .route("", web::get().to(product_handlers::list_products_handler))
        .route("", web::post().to(product_handlers::create_product_handler))
        .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
        .route("/{product_id}", web::put().to(product_handlers::update_product_handler))
        .route("/{product_id}", web::delete().to(product_handlers::delete_product_handler)),
    )
    .service(
      web::scope("/orders")
        .route("", web::get().to(order_handlers::list_orders_handler))
        .route("/{id}", web::get().to(order_handlers::get_order_handler))
        // On POST the path segment is the product being ordered.
        .route("/{id}", web::post().to(order_handlers::create_order_handler))
        .route("/{id}/status", web::put().to(order_handlers::advance_order_status_handler)),
    )
    .route("/checkout", web::post().to(checkout_handlers::checkout_handler))
    .service(
      web::scope("/admin")
        .route("/register", web::post().to(admin_handlers::register_admin_handler))
        .route("/login", web::post().to(admin_handlers::login_admin_handler)),
    );
}
