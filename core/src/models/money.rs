// storefront/src/models/money.rs

//! Prices are held as integer cents and exchanged as a decimal `price`
//! (`12.5`, `"12.50"`, `12`). More than two decimal places is rejected.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
  Number(f64),
  Text(String),
}

fn cents_from_f64(value: f64) -> Result<i64, String> {
  if !value.is_finite() {
    return Err("price must be a finite number".to_string());
  }
  let cents = value * 100.0;
  let rounded = cents.round();
  if (cents - rounded).abs() > 1e-6 {
    return Err(format!("price {} has more than two decimal places", value));
  }
  if rounded.abs() > i64::MAX as f64 / 2.0 {
    return Err(format!("price {} is out of range", value));
  }
  Ok(rounded as i64)
}

/// Parses `"12"`, `"12.5"`, `"-3.07"` into cents without going through floats.
pub fn parse_cents(text: &str) -> Result<i64, String> {
  let text = text.trim();
  let (negative, digits) = match text.strip_prefix('-') {
    Some(rest) => (true, rest),
    None => (false, text),
  };
  let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
  let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
  if whole.is_empty() || !is_digits(whole) || !is_digits(frac) || frac.len() > 2 {
    return Err(format!("'{}' is not a price with at most two decimal places", text));
  }

  let whole: i64 = whole.parse().map_err(|_| format!("price '{}' is out of range", text))?;
  let frac_cents = match frac.len() {
    0 => 0,
    1 => i64::from(frac.as_bytes()[0] - b'0') * 10,
    _ => i64::from(frac.as_bytes()[0] - b'0') * 10 + i64::from(frac.as_bytes()[1] - b'0'),
  };
  let cents = whole
    .checked_mul(100)
    .and_then(|c| c.checked_add(frac_cents))
    .ok_or_else(|| format!("price '{}' is out of range", text))?;
  Ok(if negative { -cents } else { cents })
}

pub fn serialize<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_f64(*cents as f64 / 100.0)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
  match RawPrice::deserialize(deserializer)? {
    RawPrice::Number(n) => cents_from_f64(n),
    RawPrice::Text(t) => parse_cents(&t),
  }
  .map_err(D::Error::custom)
}
