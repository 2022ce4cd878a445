// storefront_server/src/services/mod.rs

pub mod admin_service;
pub mod auth_service;

pub use admin_service::AdminService;
