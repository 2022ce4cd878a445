// storefront_server/src/services/admin_service.rs

use std::sync::Arc;

use storefront::{validation, Admin, AdminStore, NewAdmin, StorefrontError};
use tracing::{info, instrument, warn};

use super::auth_service::{hash_password, verify_password};
use crate::errors::{AppError, Result};

const INVALID_LOGIN: &str = "Invalid email or password";

#[derive(Clone)]
pub struct AdminService {
  store: Arc<dyn AdminStore>,
}

impl AdminService {
  pub fn new(store: Arc<dyn AdminStore>) -> Self {
    Self { store }
  }

  #[instrument(name = "admin_service::register", skip(self, password), err(Display))]
  pub async fn register(&self, email: Option<&str>, password: Option<&str>) -> Result<Admin> {
    let (email, password) = validation::validate_credentials(email, password)?;
    if self.store.find_admin_by_email(&email).await?.is_some() {
      return Err(StorefrontError::Conflict("Admin already exists".to_string()).into());
    }
    let password_hash = hash_password(&password)?;
    // The unique index still catches a concurrent registration of the same email.
    let admin = self.store.insert_admin(NewAdmin { email, password_hash }).await?;
    info!(admin_id = admin.id, "Admin registered.");
    Ok(admin)
  }

  /// Unknown email and wrong password fail identically.
  #[instrument(name = "admin_service::login", skip(self, password), err(Display))]
  pub async fn login(&self, email: Option<&str>, password: Option<&str>) -> Result<Admin> {
    let (email, password) = validation::validate_credentials(email, password)?;
    let admin = match self.store.find_admin_by_email(&email).await? {
      Some(admin) => admin,
      None => {
        warn!("Login for unknown admin email.");
        return Err(AppError::Auth(INVALID_LOGIN.to_string()));
      }
    };
    if !verify_password(&admin.password_hash, &password)? {
      warn!(admin_id = admin.id, "Login with wrong password.");
      return Err(AppError::Auth(INVALID_LOGIN.to_string()));
    }
    info!(admin_id = admin.id, "Admin logged in.");
    Ok(admin)
  }
}
