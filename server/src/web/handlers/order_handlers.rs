// storefront_server/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use storefront::{OrderId, OrderRequest, ProductId};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

// Customer contact fields stay out of the span.
#[instrument(
  name = "handler::create_order",
  skip(app_state, path, body),
  fields(product_id = %path.as_ref(), qty = ?body.qty)
)]
pub async fn create_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<ProductId>,
  body: web::Json<OrderRequest>,
) -> Result<HttpResponse, AppError> {
  let order_id = app_state.orders.place_order(path.into_inner(), &body).await?;
  info!(order_id, "Order created.");
  Ok(HttpResponse::Created().json(json!({
      "message": "Order created successfully",
      "orderId": order_id
  })))
}

#[instrument(name = "handler::advance_order_status", skip(app_state, path), fields(order_id = %path.as_ref()))]
pub async fn advance_order_status_handler(
  app_state: web::Data<AppState>,
  path: web::Path<OrderId>,
) -> Result<HttpResponse, AppError> {
  let status = app_state.orders.advance_status(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({
      "message": "Order status updated",
      "status": status
  })))
}

#[instrument(name = "handler::list_orders", skip(app_state))]
pub async fn list_orders_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let orders = app_state.orders.list_orders().await?;
  Ok(HttpResponse::Ok().json(orders))
}

#[instrument(name = "handler::get_order", skip(app_state, path), fields(order_id = %path.as_ref()))]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<OrderId>,
) -> Result<HttpResponse, AppError> {
  let order = app_state.orders.get_order(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(order))
}
