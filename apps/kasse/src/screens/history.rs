//! # History Screen
//!
//! Read-only list of past orders, newest first, each with its items.

use kasse_core::{Money, OrderWithItems};
use kasse_db::Database;

use crate::error::AppResult;

/// How many orders the screen shows unless told otherwise.
pub const DEFAULT_LIMIT: u32 = 50;

/// State of the History screen.
#[derive(Debug, Clone)]
pub struct HistoryScreen {
    orders: Vec<OrderWithItems>,
}

impl HistoryScreen {
    pub async fn load(db: &Database, limit: u32) -> AppResult<Self> {
        let orders = db.orders().list_with_items(limit).await?;
        Ok(HistoryScreen { orders })
    }

    pub fn orders(&self) -> &[OrderWithItems] {
        &self.orders
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Sum of the shown order totals.
    pub fn revenue(&self) -> Money {
        self.orders.iter().map(|o| o.order.total).sum()
    }
}
