// storefront/src/models/mod.rs

//! Data structures shared by the services and every store implementation.

pub mod admin;
pub mod cart;
pub mod money;
pub mod order;
pub mod product;

pub use admin::{Admin, AdminId, NewAdmin};
pub use cart::{Cart, CartLine};
pub use order::{CustomerDetails, NewOrder, Order, OrderId, OrderRequest, OrderStatus};
pub use product::{Product, ProductId, ProductInput};
