//! # kasse-core: Pure Business Logic for Kasse
//!
//! Everything the till computes lives here as plain functions over plain
//! data. No database, no terminal, no clock reads outside of types.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Kasse Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Screens (apps/kasse)                               │   │
//! │  │        Kasse ──► Products ──► History                           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasse-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │ Category  │  │   Money   │  │   Cart    │  │  names    │  │   │
//! │  │   │ Product   │  │  (cents)  │  │ Checkout  │  │  prices   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                kasse-db (Database Layer)                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Product, Order, OrderItem)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - The cart reducer and checkout math
//! - [`validation`] - Form input rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use kasse_core::{Cart, Money, Product};
//!
//! let coffee = Product::new(1, "Coffee", Money::from_cents(250), Some(1));
//! let water = Product::new(2, "Water", Money::from_cents(100), Some(1));
//!
//! let mut cart = Cart::new();
//! cart.add(&coffee);
//! cart.add(&coffee);
//! cart.add(&water);
//! assert_eq!(cart.total(), Money::from_cents(600));
//!
//! cart.remove(coffee.id);
//! assert_eq!(cart.total(), Money::from_cents(350));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem, Checkout};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
