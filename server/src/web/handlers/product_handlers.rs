// storefront_server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use storefront::{ProductId, ProductInput};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state.catalog.list_products().await?;
  info!(count = products.len(), "Fetched products.");
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<ProductId>,
) -> Result<HttpResponse, AppError> {
  let product = app_state.catalog.get_product(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::create_product", skip(app_state, body))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  body: web::Json<ProductInput>,
) -> Result<HttpResponse, AppError> {
  let product = app_state.catalog.create_product(&body).await?;
  Ok(HttpResponse::Created().json(json!({
      "message": "Product added",
      "productId": product.id
  })))
}

#[instrument(name = "handler::update_product", skip(app_state, path, body), fields(product_id = %path.as_ref()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<ProductId>,
  body: web::Json<ProductInput>,
) -> Result<HttpResponse, AppError> {
  let product = app_state.catalog.update_product(path.into_inner(), &body).await?;
  Ok(HttpResponse::Ok().json(json!({
      "message": "Product updated",
      "product": product
  })))
}

#[instrument(name = "handler::delete_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<ProductId>,
) -> Result<HttpResponse, AppError> {
  app_state.catalog.delete_product(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Product deleted" })))
}
