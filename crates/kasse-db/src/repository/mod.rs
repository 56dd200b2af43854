//! # Repository Module
//!
//! Database repository implementations for Kasse.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen                                                                 │
//! │       │  db.products().list()                                           │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── list / list_by_category / list_with_category                       │
//! │  ├── get / insert / update / delete                                     │
//! │       │                                                                 │
//! │       │  SQL + row → domain conversion                                  │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`](category::CategoryRepository) - Category CRUD and cascade delete
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD
//! - [`OrderRepository`](order::OrderRepository) - Checkout persistence and history

pub mod category;
pub mod order;
pub mod product;

use kasse_core::validation::MAX_PRICE_CENTS;
use kasse_core::Money;
use tracing::warn;

/// Reads a `REAL` money column (whole units) into cents.
///
/// Saturates at the `i64` bounds; NaN reads as zero.
pub(crate) fn money_from_real(value: f64) -> Money {
    Money::from_cents((value * 100.0).round() as i64)
}

/// Reads a product price, clamped to `0..=MAX_PRICE_CENTS`.
///
/// Older databases may hold prices the forms never accept (negative,
/// `1e17`, NaN). Those rows still load, at the nearest valid price, so
/// they can be seen and corrected.
pub(crate) fn price_from_real(product_id: i64, value: f64) -> Money {
    let cents = money_from_real(value).cents();
    let clamped = if value.is_nan() {
        0
    } else {
        cents.clamp(0, MAX_PRICE_CENTS)
    };

    if clamped != cents || value.is_nan() {
        warn!(product_id, stored = value, "Stored price out of range, clamped");
    }
    Money::from_cents(clamped)
}

/// Writes cents as a `REAL` money column (whole units).
pub(crate) fn money_to_real(money: Money) -> f64 {
    money.cents() as f64 / 100.0
}
