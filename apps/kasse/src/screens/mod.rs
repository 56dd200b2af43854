//! # Screens
//!
//! State holders for the three screens of the till. Each loads what it
//! shows from the database and writes through the repositories.
//!
//! - [`KasseScreen`] - Category tabs, product grid, cart, checkout
//! - [`ProductsScreen`] - Category and product maintenance
//! - [`HistoryScreen`] - Past orders

pub mod history;
pub mod kasse;
pub mod products;

pub use history::HistoryScreen;
pub use kasse::KasseScreen;
pub use products::{ProductForm, ProductsScreen};
