//! # Kasse Screen
//!
//! The register: category tabs, the product grid and the running cart.
//!
//! ## Screen Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [Backwaren] [Getränke*] [Snacks]          ← categories, first selected │
//! │                                                                         │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐                                 │
//! │  │ Kaffee   │ │ Tee      │ │ Wasser   │    ← visible_products()         │
//! │  │ 2.50     │ │ 2.00     │ │ 1.00     │      tap → add_to_cart(id)      │
//! │  └──────────┘ └──────────┘ └──────────┘                                 │
//! │                                                                         │
//! │  CART                                                                   │
//! │  Kaffee        x2      5.00               ← tap line → remove_from_cart │
//! │  Wasser        x1      1.00                                             │
//! │  ─────────────────────────────                                          │
//! │  TOTAL                 6.00               ← total()                     │
//! │                                                                         │
//! │  [Clear]  [Checkout: cash ____]           ← clear_cart() / checkout()   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use crate::error::AppResult;
use kasse_core::{Cart, Category, CoreError, Money, OrderWithItems, Product};
use kasse_db::Database;

/// State of the Kasse screen.
#[derive(Debug)]
pub struct KasseScreen {
    db: Database,
    categories: Vec<Category>,
    products: Vec<Product>,
    selected_category: Option<i64>,
    cart: Cart,
}

impl KasseScreen {
    /// Loads categories and products and selects the first category.
    pub async fn load(db: Database) -> AppResult<Self> {
        let mut screen = KasseScreen {
            db,
            categories: Vec::new(),
            products: Vec::new(),
            selected_category: None,
            cart: Cart::new(),
        };
        screen.reload().await?;
        Ok(screen)
    }

    /// Re-reads categories and products. The cart is kept.
    ///
    /// The selection survives if its category still exists; otherwise it
    /// falls back to the first category.
    pub async fn reload(&mut self) -> AppResult<()> {
        self.categories = self.db.categories().list().await?;
        self.products = self.db.products().list().await?;

        let still_there = self
            .selected_category
            .is_some_and(|id| self.categories.iter().any(|c| c.id == id));
        if !still_there {
            self.selected_category = self.categories.first().map(|c| c.id);
        }

        debug!(
            categories = self.categories.len(),
            products = self.products.len(),
            "Kasse screen loaded"
        );
        Ok(())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn selected_category(&self) -> Option<i64> {
        self.selected_category
    }

    /// Switches the product grid to another category.
    pub fn select_category(&mut self, category_id: i64) -> AppResult<()> {
        if !self.categories.iter().any(|c| c.id == category_id) {
            return Err(CoreError::CategoryNotFound(category_id).into());
        }
        self.selected_category = Some(category_id);
        Ok(())
    }

    /// Products of the selected category, or all products when there is
    /// no category at all.
    pub fn visible_products(&self) -> Vec<&Product> {
        match self.selected_category {
            Some(id) => self.products.iter().filter(|p| p.is_in_category(id)).collect(),
            None => self.products.iter().collect(),
        }
    }

    /// Adds one unit of a loaded product to the cart.
    pub fn add_to_cart(&mut self, product_id: i64) -> AppResult<()> {
        let product = self
            .products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or(CoreError::ProductNotFound(product_id))?;

        self.cart.add(product);
        debug!(product_id, quantity = self.cart.quantity_of(product_id), "Added to cart");
        Ok(())
    }

    /// Takes one unit of a product off the cart. Returns `false` when the
    /// product wasn't in the cart.
    pub fn remove_from_cart(&mut self, product_id: i64) -> bool {
        self.cart.remove(product_id)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Records the cart as an order and empties it.
    ///
    /// On any error the cart is left untouched so the cashier can retry.
    pub async fn checkout(&mut self, cash_given: Money) -> AppResult<OrderWithItems> {
        let checkout = self.cart.checkout(cash_given)?;
        let order = self.db.orders().record(&checkout).await?;

        self.cart.clear();
        info!(order_id = order.order.id, "Checkout complete");
        Ok(order)
    }
}
