// tests/catalog_tests.rs
mod common;

use common::*;
use storefront::{ProductInput, StorefrontError};

fn mug(stock: i32) -> ProductInput {
  ProductInput {
    name: "Mug".to_string(),
    price_cents: 1500,
    description: Some("Ceramic".to_string()),
    category: Some("Kitchen".to_string()),
    image: Some("mug.png".to_string()),
    stock,
  }
}

#[tokio::test]
async fn test_create_get_update_delete_product() {
  let shop = shop();
  let created = shop.catalog.create_product(&mug(8)).await.unwrap();
  assert_eq!(shop.catalog.get_product(created.id).await.unwrap(), created);

  let mut edit = mug(12);
  edit.name = "Big mug".to_string();
  edit.image = None;
  let updated = shop.catalog.update_product(created.id, &edit).await.unwrap();
  assert_eq!(updated.name, "Big mug");
  assert_eq!(updated.stock, 12);
  assert_eq!(updated.image.as_deref(), Some("mug.png"), "image kept when none supplied");

  shop.catalog.delete_product(created.id).await.unwrap();
  assert!(matches!(
    shop.catalog.get_product(created.id).await,
    Err(StorefrontError::NotFound { .. })
  ));
}

#[tokio::test]
async fn test_invalid_product_input_is_rejected() {
  let shop = shop();
  let mut input = mug(1);
  input.price_cents = -5;
  assert!(matches!(
    shop.catalog.create_product(&input).await,
    Err(StorefrontError::Validation { field: "price", .. })
  ));

  let mut input = mug(1);
  input.name = " ".to_string();
  assert!(matches!(
    shop.catalog.create_product(&input).await,
    Err(StorefrontError::Validation { field: "name", .. })
  ));
  assert!(shop.catalog.list_products().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_product_update_and_delete_are_not_found() {
  let shop = shop();
  assert!(matches!(
    shop.catalog.update_product(5, &mug(1)).await,
    Err(StorefrontError::NotFound { .. })
  ));
  assert!(matches!(
    shop.catalog.delete_product(5).await,
    Err(StorefrontError::NotFound { .. })
  ));
}

#[tokio::test]
async fn test_product_with_orders_cannot_be_deleted() {
  let shop = shop();
  let product = shop.catalog.create_product(&mug(3)).await.unwrap();
  shop.orders.place_order(product.id, &valid_customer(1)).await.unwrap();

  assert!(matches!(
    shop.catalog.delete_product(product.id).await,
    Err(StorefrontError::Conflict(_))
  ));
  assert!(shop.catalog.get_product(product.id).await.is_ok());
}

#[tokio::test]
async fn test_restock_after_sell_out_allows_new_orders() {
  let shop = shop();
  let product = shop.catalog.create_product(&mug(1)).await.unwrap();
  shop.orders.place_order(product.id, &valid_customer(1)).await.unwrap();
  assert!(shop.orders.place_order(product.id, &valid_customer(1)).await.is_err());

  shop.catalog.update_product(product.id, &mug(5)).await.unwrap();
  shop.orders.place_order(product.id, &valid_customer(2)).await.unwrap();
  assert_eq!(shop.store.stock_of(product.id), Some(3));
}
