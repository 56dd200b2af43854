//! # Domain Types
//!
//! Core domain types used throughout Kasse.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    Category     │◄──│    Product      │                              │
//! │  │  id, name       │   │  id, name       │                              │
//! │  └─────────────────┘   │  price (Money)  │                              │
//! │                        │  category_id?   │                              │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │     Order       │◄──│   OrderItem     │                              │
//! │  │  total          │   │  product_name   │  (snapshot)                  │
//! │  │  cash_given     │   │  product_price  │  (snapshot)                  │
//! │  │  change         │   │  quantity       │                              │
//! │  │  created_at     │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ids are SQLite `INTEGER PRIMARY KEY AUTOINCREMENT` rowids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A product group shown as a tab on the Kasse screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,

    /// Display name on the product grid and in order history.
    pub name: String,

    pub price: Money,

    /// Owning category. Nullable in the schema; the app always sets it.
    pub category_id: Option<i64>,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, price: Money, category_id: Option<i64>) -> Self {
        Product {
            id,
            name: name.into(),
            price,
            category_id,
        }
    }

    /// Whether this product shows under the given category tab.
    #[inline]
    pub fn is_in_category(&self, category_id: i64) -> bool {
        self.category_id == Some(category_id)
    }
}

/// Fields for inserting a product; the id is assigned by SQLite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub category_id: Option<i64>,
}

/// A product joined with its category's name, as the Products screen lists it.
///
/// `category_name` is `None` when the category row no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListing {
    #[serde(flatten)]
    pub product: Product,
    pub category_name: Option<String>,
}

// =============================================================================
// Order
// =============================================================================

/// A completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub total: Money,
    pub cash_given: Money,
    pub change: Money,
    pub created_at: DateTime<Utc>,
}

/// A line of a completed sale.
///
/// Name and price are frozen at checkout so history survives later edits
/// or deletion of the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_name: String,
    pub product_price: Money,
    pub quantity: i64,
}

impl OrderItem {
    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product_price.multiply_quantity(self.quantity)
    }
}

/// An order with its lines, for the History screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_category_membership() {
        let product = Product::new(1, "Espresso", Money::from_cents(180), Some(3));
        assert!(product.is_in_category(3));
        assert!(!product.is_in_category(4));

        let orphan = Product::new(2, "Loose", Money::from_cents(100), None);
        assert!(!orphan.is_in_category(3));
    }

    #[test]
    fn test_order_item_line_total() {
        let item = OrderItem {
            id: 1,
            order_id: 1,
            product_name: "Brezel".to_string(),
            product_price: Money::from_cents(120),
            quantity: 3,
        };
        assert_eq!(item.line_total(), Money::from_cents(360));
    }

    #[test]
    fn test_listing_serializes_flat() {
        let listing = ProductListing {
            product: Product::new(7, "Tea", Money::from_cents(200), Some(1)),
            category_name: Some("Drinks".to_string()),
        };
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["name"], "Tea");
        assert_eq!(json["price"], 200);
        assert_eq!(json["category_name"], "Drinks");
    }
}
