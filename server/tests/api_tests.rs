// storefront_server/tests/api_tests.rs
//
// The full route table over the in-memory store; no database needed.

use std::sync::Arc;

use actix_web::http::{header, Method, StatusCode};
use actix_web::{test, web, App};
use serde_json::{json, Value};
use storefront::{CatalogStore, MemoryStore, ProductInput};
use storefront_server::config::AppConfig;
use storefront_server::state::AppState;
use storefront_server::web::{configure_app_routes, cors_middleware};

// Same middleware and routes as the binary.
macro_rules! app {
  ($state:expr) => {{
    let state: AppState = $state;
    let cors = cors_middleware(&state.config.cors_allowed_origins);
    test::init_service(
      App::new()
        .app_data(web::Data::new(state))
        .wrap(cors)
        .configure(configure_app_routes),
    )
    .await
  }};
}

fn memory_state() -> (MemoryStore, AppState) {
  memory_state_with(&[])
}

fn memory_state_with(extra: &[(&str, &str)]) -> (MemoryStore, AppState) {
  let extra: Vec<(String, String)> = extra.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
  let config = AppConfig::from_lookup(|name| match name {
    "STORAGE_BACKEND" => Some("memory".to_string()),
    other => extra.iter().find(|(k, _)| k == other).map(|(_, v)| v.clone()),
  })
  .expect("memory config");
  let store = MemoryStore::new();
  let state = AppState::new(Arc::new(store.clone()), Arc::new(config));
  (store, state)
}

async fn add_product(store: &MemoryStore, name: &str, stock: i32) -> i64 {
  store
    .insert_product(ProductInput {
      name: name.to_string(),
      price_cents: 1500,
      stock,
      ..Default::default()
    })
    .await
    .expect("insert product")
    .id
}

fn order_body(qty: i64) -> Value {
  json!({
    "cust_name": "Aline Uwase",
    "cust_phone": "+250788123456",
    "cust_email": "aline@example.com",
    "qty": qty,
    "location": "Kigali"
  })
}

#[actix_web::test]
async fn health_reports_ok() {
  let (_, state) = memory_state();
  let app = app!(state);
  let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn create_order_returns_201_and_decrements_stock() {
  let (store, state) = memory_state();
  let product_id = add_product(&store, "Basket", 5).await;
  let app = app!(state);

  let req = test::TestRequest::post()
    .uri(&format!("/orders/{}", product_id))
    .set_json(order_body(3))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["message"], "Order created successfully");
  let order_id = body["orderId"].as_i64().expect("orderId");

  assert_eq!(store.stock_of(product_id), Some(2));

  let resp = test::call_service(
    &app,
    test::TestRequest::get().uri(&format!("/orders/{}", order_id)).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let order: Value = test::read_body_json(resp).await;
  assert_eq!(order["qty"], 3);
  assert_eq!(order["status"], "Pending");
  assert_eq!(order["product_id"], product_id);
}

#[actix_web::test]
async fn insufficient_stock_is_400_with_the_shortfall() {
  let (store, state) = memory_state();
  let product_id = add_product(&store, "Basket", 2).await;
  let app = app!(state);

  let req = test::TestRequest::post()
    .uri(&format!("/orders/{}", product_id))
    .set_json(order_body(5))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "insufficient_stock");
  assert_eq!(body["requested"], 5);
  assert_eq!(body["available"], 2);
  assert_eq!(body["message"], "Only 2 items available (requested 5)");
  assert_eq!(store.stock_of(product_id), Some(2));
  assert_eq!(store.order_count(), 0);
}

#[actix_web::test]
async fn order_for_unknown_product_is_404() {
  let (_, state) = memory_state();
  let app = app!(state);
  let req = test::TestRequest::post()
    .uri("/orders/999")
    .set_json(order_body(1))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "not_found");
}

#[actix_web::test]
async fn missing_field_is_400_naming_the_field() {
  let (store, state) = memory_state();
  let product_id = add_product(&store, "Basket", 5).await;
  let app = app!(state);

  let mut body = order_body(1);
  body.as_object_mut().unwrap().remove("location");
  let req = test::TestRequest::post()
    .uri(&format!("/orders/{}", product_id))
    .set_json(body)
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "validation");
  assert_eq!(body["field"], "location");
}

#[actix_web::test]
async fn malformed_json_and_bad_ids_are_400() {
  let (store, state) = memory_state();
  let product_id = add_product(&store, "Basket", 5).await;
  let app = app!(state);

  let req = test::TestRequest::post()
    .uri(&format!("/orders/{}", product_id))
    .insert_header(("content-type", "application/json"))
    .set_payload("{\"cust_name\": ")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "bad_request");

  let resp = test::call_service(&app, test::TestRequest::get().uri("/orders/abc").to_request()).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn status_advances_and_stops_at_delivered() {
  let (store, state) = memory_state();
  let product_id = add_product(&store, "Basket", 5).await;
  let app = app!(state);

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri(&format!("/orders/{}", product_id))
      .set_json(order_body(1))
      .to_request(),
  )
  .await;
  let created: Value = test::read_body_json(resp).await;
  let order_id = created["orderId"].as_i64().unwrap();

  for expected in ["Paid", "Delivered", "Delivered"] {
    let resp = test::call_service(
      &app,
      test::TestRequest::put()
        .uri(&format!("/orders/{}/status", order_id))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Order status updated");
    assert_eq!(body["status"], expected);
  }

  let resp = test::call_service(&app, test::TestRequest::put().uri("/orders/4242/status").to_request()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn orders_are_listed_newest_first() {
  let (store, state) = memory_state();
  let product_id = add_product(&store, "Basket", 10).await;
  let app = app!(state);

  let mut created = Vec::new();
  for _ in 0..3 {
    let resp = test::call_service(
      &app,
      test::TestRequest::post()
        .uri(&format!("/orders/{}", product_id))
        .set_json(order_body(1))
        .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    created.push(body["orderId"].as_i64().unwrap());
  }

  let resp = test::call_service(&app, test::TestRequest::get().uri("/orders").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let orders: Vec<Value> = test::read_body_json(resp).await;
  let ids: Vec<i64> = orders.iter().map(|o| o["id"].as_i64().unwrap()).collect();
  created.reverse();
  assert_eq!(ids, created);
}

#[actix_web::test]
async fn product_crud_round() {
  let (_, state) = memory_state();
  let app = app!(state);

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/products")
      .set_json(json!({"name": "Imigongo Panel", "price": 48, "stock": 4, "image": "uploads/panel.jpg"}))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["message"], "Product added");
  let id = body["productId"].as_i64().unwrap();

  // No image in the update keeps the stored one.
  let resp = test::call_service(
    &app,
    test::TestRequest::put()
      .uri(&format!("/products/{}", id))
      .set_json(json!({"name": "Imigongo Panel XL", "price": "52.50", "stock": 6}))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["product"]["name"], "Imigongo Panel XL");
  assert_eq!(body["product"]["image"], "uploads/panel.jpg");
  assert_eq!(body["product"]["price"], 52.5);

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/products")
      .set_json(json!({"name": "  ", "price": 1}))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/products").to_request()).await;
  let products: Vec<Value> = test::read_body_json(resp).await;
  assert_eq!(products.len(), 1);

  let resp = test::call_service(
    &app,
    test::TestRequest::delete().uri(&format!("/products/{}", id)).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);

  let resp = test::call_service(
    &app,
    test::TestRequest::get().uri(&format!("/products/{}", id)).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn product_price_is_a_decimal_on_the_wire() {
  let (store, state) = memory_state();
  let app = app!(state);

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/products")
      .set_json(json!({"name": "Mug", "price": 12.5, "description": "Enamel", "category": "Home", "stock": 3}))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let body: Value = test::read_body_json(resp).await;
  let id = body["productId"].as_i64().unwrap();
  assert_eq!(store.get_product(id).await.unwrap().unwrap().price_cents, 1250);

  let resp = test::call_service(&app, test::TestRequest::get().uri(&format!("/products/{}", id)).to_request()).await;
  let product: Value = test::read_body_json(resp).await;
  assert_eq!(product["price"], 12.5);
  assert_eq!(product["category"], "Home");

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/products")
      .set_json(json!({"name": "Mug", "price": -2, "stock": 3}))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["field"], "price");
}

#[actix_web::test]
async fn deleting_an_ordered_product_conflicts() {
  let (store, state) = memory_state();
  let product_id = add_product(&store, "Basket", 5).await;
  let app = app!(state);

  test::call_service(
    &app,
    test::TestRequest::post()
      .uri(&format!("/orders/{}", product_id))
      .set_json(order_body(1))
      .to_request(),
  )
  .await;

  let resp = test::call_service(
    &app,
    test::TestRequest::delete()
      .uri(&format!("/products/{}", product_id))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn checkout_places_what_it_can() {
  let (store, state) = memory_state();
  let plenty = add_product(&store, "Tote", 10).await;
  let scarce = add_product(&store, "Vase", 1).await;
  let app = app!(state);

  let req = test::TestRequest::post()
    .uri("/checkout")
    .set_json(json!({
      "cust_name": "Aline Uwase",
      "cust_phone": "0788123456",
      "location": "Huye",
      "items": [
        {"product_id": plenty, "qty": 2},
        {"product_id": scarce, "qty": 3},
        {"product_id": 777, "qty": 1}
      ]
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["placed"], 1);
  assert_eq!(body["rejected"], 2);
  assert_eq!(body["results"][0]["status"], "placed");
  assert_eq!(body["results"][1]["error"], "insufficient_stock");
  assert_eq!(body["results"][2]["error"], "not_found");

  assert_eq!(store.stock_of(plenty), Some(8));
  assert_eq!(store.stock_of(scarce), Some(1));
}

#[actix_web::test]
async fn checkout_with_bad_shared_details_is_400() {
  let (store, state) = memory_state();
  let product_id = add_product(&store, "Tote", 10).await;
  let app = app!(state);

  let req = test::TestRequest::post()
    .uri("/checkout")
    .set_json(json!({
      "cust_name": "Aline Uwase",
      "cust_phone": "abc",
      "location": "Huye",
      "items": [{"product_id": product_id, "qty": 1}]
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["field"], "cust_phone");
  assert_eq!(store.order_count(), 0);
}

#[actix_web::test]
async fn admin_register_and_login() {
  let (_, state) = memory_state();
  let app = app!(state);
  let creds = json!({"email": "owner@shop.rw", "password": "murakoze-2024"});

  let resp = test::call_service(
    &app,
    test::TestRequest::post().uri("/admin/register").set_json(&creds).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let resp = test::call_service(
    &app,
    test::TestRequest::post().uri("/admin/register").set_json(&creds).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::CONFLICT);

  let resp = test::call_service(
    &app,
    test::TestRequest::post().uri("/admin/login").set_json(&creds).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["admin"]["email"], "owner@shop.rw");
  assert!(body["admin"].get("password_hash").is_none());

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/admin/login")
      .set_json(json!({"email": "owner@shop.rw", "password": "wrong"}))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["message"], "Invalid email or password");

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/admin/register")
      .set_json(json!({"email": "x@shop.rw"}))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn browser_preflight_is_answered_for_any_origin_by_default() {
  let (store, state) = memory_state();
  let product_id = add_product(&store, "Basket", 5).await;
  let app = app!(state);

  let req = test::TestRequest::default()
    .method(Method::OPTIONS)
    .uri(&format!("/orders/{}", product_id))
    .insert_header((header::ORIGIN, "http://localhost:5173"))
    .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
    .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert!(resp.status().is_success(), "preflight answered with {}", resp.status());
  assert_eq!(
    resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).and_then(|v| v.to_str().ok()),
    Some("http://localhost:5173")
  );

  let req = test::TestRequest::get()
    .uri("/products")
    .insert_header((header::ORIGIN, "http://localhost:5173"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[actix_web::test]
async fn configured_origin_list_rejects_strangers() {
  let (_, state) = memory_state_with(&[("CORS_ALLOWED_ORIGIN", "http://localhost:5173")]);
  let app = app!(state);

  let preflight = |origin: &'static str| {
    test::TestRequest::default()
      .method(Method::OPTIONS)
      .uri("/products")
      .insert_header((header::ORIGIN, origin))
      .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
      .to_request()
  };

  let resp = test::call_service(&app, preflight("http://localhost:5173")).await;
  assert!(resp.status().is_success());

  let resp = test::call_service(&app, preflight("http://elsewhere.test")).await;
  assert!(resp.status().is_client_error());
  assert!(!resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
