// storefront/src/service/mod.rs

pub mod catalog;
pub mod checkout;
pub mod orders;

pub use catalog::CatalogService;
pub use checkout::{CheckoutReport, CheckoutRequest, CheckoutService, LineOutcome, LineResult};
pub use orders::{OrderService, PlacementStep};
