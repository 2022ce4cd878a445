// storefront/src/validation.rs

//! Input validation for order submissions, product edits and admin credentials.
//!
//! Every rejection names the wire field it concerns so callers can point the
//! end user at it.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{StorefrontError, StorefrontResult};
use crate::models::{CustomerDetails, NewOrder, OrderRequest, OrderStatus, ProductId, ProductInput};

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9+ ]{7,15}$").expect("phone pattern compiles"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"));

/// Returns the trimmed value, or a `Validation` error if it is missing or blank.
fn required(field: &'static str, value: Option<&str>) -> StorefrontResult<String> {
  match value.map(str::trim) {
    Some(v) if !v.is_empty() => Ok(v.to_string()),
    _ => Err(StorefrontError::validation(field, "is required")),
  }
}

/// Blank optional text is treated as absent.
fn optional(value: Option<&str>) -> Option<String> {
  value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

pub fn validate_customer(
  name: Option<&str>,
  phone: Option<&str>,
  email: Option<&str>,
) -> StorefrontResult<CustomerDetails> {
  let name = required("cust_name", name)?;

  let phone = required("cust_phone", phone)?;
  if !PHONE_RE.is_match(&phone) {
    return Err(StorefrontError::validation(
      "cust_phone",
      "must be 7-15 characters of digits, '+' or spaces",
    ));
  }

  let email = optional(email);
  if let Some(e) = &email {
    if !EMAIL_RE.is_match(e) {
      return Err(StorefrontError::validation("cust_email", "must look like name@domain.tld"));
    }
  }

  Ok(CustomerDetails { name, phone, email })
}

pub fn validate_qty(qty: Option<i64>) -> StorefrontResult<i32> {
  let qty = qty.ok_or_else(|| StorefrontError::validation("qty", "is required"))?;
  if qty < 1 {
    return Err(StorefrontError::validation("qty", "must be at least 1"));
  }
  i32::try_from(qty).map_err(|_| StorefrontError::validation("qty", "is too large"))
}

pub fn validate_location(location: Option<&str>) -> StorefrontResult<String> {
  required("location", location)
}

/// Validates a raw order submission for `product_id`.
///
/// Any `status` the caller sent is ignored: orders are always created `Pending`.
pub fn validate_order_request(product_id: ProductId, req: &OrderRequest) -> StorefrontResult<NewOrder> {
  let customer = validate_customer(
    req.cust_name.as_deref(),
    req.cust_phone.as_deref(),
    req.cust_email.as_deref(),
  )?;
  let qty = validate_qty(req.qty)?;
  let location = validate_location(req.location.as_deref())?;

  Ok(NewOrder {
    product_id,
    customer,
    qty,
    location,
    status: OrderStatus::Pending,
  })
}

/// Normalises and checks admin-supplied product fields.
pub fn validate_product_input(input: &ProductInput) -> StorefrontResult<ProductInput> {
  let name = required("name", Some(&input.name))?;
  if input.price_cents < 0 {
    return Err(StorefrontError::validation("price", "must not be negative"));
  }
  if input.stock < 0 {
    return Err(StorefrontError::validation("stock", "must not be negative"));
  }

  Ok(ProductInput {
    name,
    price_cents: input.price_cents,
    description: optional(input.description.as_deref()),
    category: optional(input.category.as_deref()),
    image: optional(input.image.as_deref()),
    stock: input.stock,
  })
}

/// Returns the trimmed email and the untouched password.
pub fn validate_credentials(email: Option<&str>, password: Option<&str>) -> StorefrontResult<(String, String)> {
  let email = required("email", email)?;
  match password {
    Some(p) if !p.trim().is_empty() => Ok((email, p.to_string())),
    _ => Err(StorefrontError::validation("password", "is required")),
  }
}
