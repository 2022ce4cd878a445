// storefront_server/src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::{json, Value};
use storefront::{CheckoutReport, CheckoutRequest, LineOutcome, LineResult};
use tracing::{info, instrument};

use crate::errors::{storefront_error_body, AppError};
use crate::state::AppState;

fn line_json(line: &LineResult) -> Value {
  match &line.outcome {
    LineOutcome::Placed { order_id } => json!({
      "product_id": line.product_id,
      "qty": line.qty,
      "status": "placed",
      "orderId": order_id,
    }),
    LineOutcome::Rejected { error } => {
      let mut body = storefront_error_body(error);
      if let Value::Object(map) = &mut body {
        map.insert("product_id".to_string(), json!(line.product_id));
        map.insert("qty".to_string(), json!(line.qty));
        map.insert("status".to_string(), json!("rejected"));
      }
      body
    }
  }
}

fn report_json(report: &CheckoutReport) -> Value {
  let message = if report.all_placed() {
    "Checkout completed"
  } else if report.placed() == 0 {
    "No items could be ordered"
  } else {
    "Checkout partially completed"
  };
  json!({
    "message": message,
    "placed": report.placed(),
    "rejected": report.rejected(),
    "results": report.lines.iter().map(line_json).collect::<Vec<_>>(),
  })
}

/// Lines are placed independently; the response is 200 even when some are rejected.
#[instrument(name = "handler::checkout", skip(app_state, body), fields(lines = body.cart.len()))]
pub async fn checkout_handler(
  app_state: web::Data<AppState>,
  body: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, AppError> {
  let report = app_state.checkout.checkout(&body).await?;
  info!(placed = report.placed(), rejected = report.rejected(), "Checkout finished.");
  Ok(HttpResponse::Ok().json(report_json(&report)))
}
