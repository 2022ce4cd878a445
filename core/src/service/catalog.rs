// storefront/src/service/catalog.rs

use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::{EntityKind, StorefrontError, StorefrontResult};
use crate::models::{Product, ProductId, ProductInput};
use crate::store::Store;
use crate::validation;

/// Admin-side product management and public catalog reads.
#[derive(Clone)]
pub struct CatalogService {
  store: Arc<dyn Store>,
}

impl CatalogService {
  pub fn new(store: Arc<dyn Store>) -> Self {
    Self { store }
  }

  #[instrument(name = "catalog_service::list_products", skip(self))]
  pub async fn list_products(&self) -> StorefrontResult<Vec<Product>> {
    self.store.list_products().await
  }

  pub async fn get_product(&self, id: ProductId) -> StorefrontResult<Product> {
    self
      .store
      .get_product(id)
      .await?
      .ok_or_else(|| StorefrontError::not_found(EntityKind::Product, id))
  }

  #[instrument(name = "catalog_service::create_product", skip(self, input), err(Display))]
  pub async fn create_product(&self, input: &ProductInput) -> StorefrontResult<Product> {
    let input = validation::validate_product_input(input)?;
    let product = self.store.insert_product(input).await?;
    info!(product_id = product.id, stock = product.stock, "Product created.");
    Ok(product)
  }

  #[instrument(name = "catalog_service::update_product", skip(self, input), err(Display))]
  pub async fn update_product(&self, id: ProductId, input: &ProductInput) -> StorefrontResult<Product> {
    let input = validation::validate_product_input(input)?;
    let product = self
      .store
      .update_product(id, input)
      .await?
      .ok_or_else(|| StorefrontError::not_found(EntityKind::Product, id))?;
    info!(stock = product.stock, "Product updated.");
    Ok(product)
  }

  #[instrument(name = "catalog_service::delete_product", skip(self), err(Display))]
  pub async fn delete_product(&self, id: ProductId) -> StorefrontResult<()> {
    if !self.store.delete_product(id).await? {
      return Err(StorefrontError::not_found(EntityKind::Product, id));
    }
    info!("Product deleted.");
    Ok(())
  }
}
