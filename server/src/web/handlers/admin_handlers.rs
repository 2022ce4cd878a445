// storefront_server/src/web/handlers/admin_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

// Both optional so a missing field is a field-named validation error rather than a parse failure.
#[derive(Deserialize, Debug)]
pub struct CredentialsRequest {
  pub email: Option<String>,
  pub password: Option<String>,
}

#[instrument(name = "handler::register_admin", skip(app_state, body))]
pub async fn register_admin_handler(
  app_state: web::Data<AppState>,
  body: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, AppError> {
  app_state
    .admins
    .register(body.email.as_deref(), body.password.as_deref())
    .await?;
  Ok(HttpResponse::Created().json(json!({ "message": "Admin created successfully" })))
}

#[instrument(name = "handler::login_admin", skip(app_state, body))]
pub async fn login_admin_handler(
  app_state: web::Data<AppState>,
  body: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, AppError> {
  let admin = app_state
    .admins
    .login(body.email.as_deref(), body.password.as_deref())
    .await?;
  Ok(HttpResponse::Ok().json(json!({
      "message": "Login successful",
      "admin": { "id": admin.id, "email": admin.email }
  })))
}
