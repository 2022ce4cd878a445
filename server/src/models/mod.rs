// storefront_server/src/models/mod.rs

//! Row shapes as Postgres returns them, and their conversion into the
//! storefront domain types.

pub mod admin;
pub mod order;
pub mod product;

pub use admin::AdminRow;
pub use order::OrderRow;
pub use product::ProductRow;
