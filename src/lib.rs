//! Storefront
//!
//! Storefront is the core of a single-page shop: a product catalog read from a CSV
//! file, catalog filters, a per-session cart, and checkout through a messaging
//! link pre-filled with the order.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod images;
pub mod prelude;
pub mod products;
pub mod render;
pub mod session;
pub mod totals;
