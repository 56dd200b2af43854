//! # Cart
//!
//! The in-memory order being rung up on the Kasse screen.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tap product ──► add()     qty + 1, or new line (qty 1) at the end      │
//! │  tap  "−"    ──► remove()  qty − 1, line dropped when it reaches 0      │
//! │  tap "Clear" ──► clear()   no lines                                     │
//! │  footer      ──► total()   Σ price × qty                                │
//! │  "Checkout"  ──► checkout(cash) ──► Checkout { total, change, lines }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id
//! - Every line has quantity >= 1
//! - Lines keep the order in which products were first added

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;

/// A line item: a product snapshot and how many of it.
///
/// The product is copied in when first added, so the line keeps the price
/// it was rung up at even if the product is edited meanwhile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: i64,
}

impl CartItem {
    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

/// The cart reducer.
///
/// All operations are total: ids come from the loaded product list, and an
/// unknown id simply leaves the cart unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds one unit of `product`.
    ///
    /// Increments the existing line if the product is already in the cart,
    /// otherwise appends a new line with quantity 1.
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity += 1;
            return;
        }

        self.items.push(CartItem {
            product: product.clone(),
            quantity: 1,
        });
    }

    /// Removes one unit of the product.
    ///
    /// Returns `false` when the product was not in the cart.
    pub fn remove(&mut self, product_id: i64) -> bool {
        let Some(pos) = self.items.iter().position(|i| i.product.id == product_id) else {
            return false;
        };

        if self.items[pos].quantity > 1 {
            self.items[pos].quantity -= 1;
        } else {
            self.items.remove(pos);
        }
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum over lines of price × quantity.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn lines(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Number of units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Quantity of one product, 0 when absent.
    pub fn quantity_of(&self, product_id: i64) -> i64 {
        self.items
            .iter()
            .find(|i| i.product.id == product_id)
            .map_or(0, |i| i.quantity)
    }

    /// Computes the sale for the given cash payment.
    ///
    /// The cart is left untouched; the caller clears it once the order has
    /// been persisted.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyCart`] when there is nothing to sell
    /// - [`CoreError::InsufficientCash`] when `cash_given` is below the total
    ///
    /// ```rust
    /// use kasse_core::{Cart, Money, Product};
    ///
    /// let mut cart = Cart::new();
    /// cart.add(&Product::new(1, "Tea", Money::from_cents(250), Some(1)));
    ///
    /// let sale = cart.checkout(Money::from_cents(500)).unwrap();
    /// assert_eq!(sale.change, Money::from_cents(250));
    /// ```
    pub fn checkout(&self, cash_given: Money) -> CoreResult<Checkout> {
        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let total = self.total();
        if cash_given < total {
            return Err(CoreError::InsufficientCash {
                total,
                given: cash_given,
            });
        }

        Ok(Checkout {
            total,
            cash_given,
            change: cash_given - total,
            lines: self.items.clone(),
        })
    }
}

/// A priced sale, ready to be written as an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    pub total: Money,
    pub cash_given: Money,
    pub change: Money,
    pub lines: Vec<CartItem>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_cents(cents), Some(1))
    }

    #[test]
    fn test_add_new_and_existing() {
        let mut cart = Cart::new();
        let a = product(1, 250);

        cart.add(&a);
        cart.add(&a);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of(1), 2);
    }

    #[test]
    fn test_new_lines_append_and_order_is_kept() {
        let mut cart = Cart::new();
        let (a, b, c) = (product(1, 100), product(2, 100), product(3, 100));

        cart.add(&b);
        cart.add(&a);
        cart.add(&c);
        cart.add(&b);

        let ids: Vec<i64> = cart.lines().iter().map(|i| i.product.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_remove_decrements_then_drops_line() {
        let mut cart = Cart::new();
        let a = product(1, 250);
        cart.add(&a);
        cart.add(&a);

        assert!(cart.remove(1));
        assert_eq!(cart.quantity_of(1), 1);

        assert!(cart.remove(1));
        assert_eq!(cart.quantity_of(1), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product(1, 250));

        assert!(!cart.remove(99));
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_worked_example_totals() {
        let mut cart = Cart::new();
        let a = product(1, 250);
        let b = product(2, 100);

        cart.add(&a);
        cart.add(&a);
        cart.add(&b);
        assert_eq!(cart.total().to_string(), "6.00");

        cart.remove(a.id);
        assert_eq!(cart.total().to_string(), "3.50");

        cart.clear();
        assert_eq!(cart.total().to_string(), "0.00");
    }

    #[test]
    fn test_line_keeps_price_at_time_of_adding() {
        let mut cart = Cart::new();
        let mut a = product(1, 250);
        cart.add(&a);

        a.price = Money::from_cents(999);
        cart.add(&a);

        assert_eq!(cart.total(), Money::from_cents(500));
    }

    #[test]
    fn test_checkout_computes_change() {
        let mut cart = Cart::new();
        cart.add(&product(1, 250));
        cart.add(&product(1, 250));
        cart.add(&product(2, 100));

        let sale = cart.checkout(Money::from_cents(1000)).unwrap();
        assert_eq!(sale.total, Money::from_cents(600));
        assert_eq!(sale.change, Money::from_cents(400));
        assert_eq!(sale.lines.len(), 2);
        // checkout does not consume the cart
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_checkout_exact_cash() {
        let mut cart = Cart::new();
        cart.add(&product(1, 250));

        let sale = cart.checkout(Money::from_cents(250)).unwrap();
        assert!(sale.change.is_zero());
    }

    #[test]
    fn test_checkout_rejects_empty_cart() {
        let cart = Cart::new();
        assert!(matches!(
            cart.checkout(Money::from_cents(100)),
            Err(CoreError::EmptyCart)
        ));
    }

    #[test]
    fn test_checkout_rejects_short_cash() {
        let mut cart = Cart::new();
        cart.add(&product(1, 250));

        let err = cart.checkout(Money::from_cents(200)).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientCash { .. }));
    }
}
