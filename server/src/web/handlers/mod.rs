// storefront_server/src/web/handlers/mod.rs

pub mod admin_handlers;
pub mod checkout_handlers;
pub mod order_handlers;
pub mod product_handlers;
