//! # Order Repository
//!
//! Persists checkouts and reads them back for the History screen.
//!
//! ## Checkout Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart::checkout(cash) ──► Checkout { total, cash_given, change, lines } │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  record(&checkout)                                                      │
//! │  BEGIN                                                                  │
//! │  INSERT INTO orders (total, cash_given, change)       → order id        │
//! │  INSERT INTO order_items (...) × lines  (name/price snapshots)          │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::{money_from_real, money_to_real};
use crate::error::{DbError, DbResult};
use kasse_core::{Checkout, Order, OrderItem, OrderWithItems};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    total: f64,
    cash_given: f64,
    change: f64,
    // `datetime('now')` text; NULL only if written by something else
    created_at: Option<NaiveDateTime>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            total: money_from_real(row.total),
            cash_given: money_from_real(row.cash_given),
            change: money_from_real(row.change),
            created_at: row
                .created_at
                .map(|t| t.and_utc())
                .unwrap_or_else(DateTime::<Utc>::default),
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    product_name: String,
    product_price: f64,
    quantity: i64,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        OrderItem {
            id: row.id,
            order_id: row.order_id,
            product_name: row.product_name,
            product_price: money_from_real(row.product_price),
            quantity: row.quantity,
        }
    }
}

const SELECT_ORDER: &str = "SELECT id, total, cash_given, change, created_at FROM orders";

/// Repository for orders and their items.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Writes a checkout as one order plus one item per cart line.
    ///
    /// All rows go in one transaction; a failure leaves no partial order.
    pub async fn record(&self, checkout: &Checkout) -> DbResult<OrderWithItems> {
        debug!(
            total = %checkout.total,
            lines = checkout.lines.len(),
            "Recording order"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let order_id = sqlx::query(
            r#"
            INSERT INTO orders (total, cash_given, change)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(money_to_real(checkout.total))
        .bind(money_to_real(checkout.cash_given))
        .bind(money_to_real(checkout.change))
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let mut items = Vec::with_capacity(checkout.lines.len());
        for line in &checkout.lines {
            let item_id = sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_name, product_price, quantity)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(order_id)
            .bind(&line.product.name)
            .bind(money_to_real(line.product.price))
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

            items.push(OrderItem {
                id: item_id,
                order_id,
                product_name: line.product.name.clone(),
                product_price: line.product.price,
                quantity: line.quantity,
            });
        }

        let row: OrderRow = sqlx::query_as(&format!("{} WHERE id = ?1", SELECT_ORDER))
            .bind(order_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let order = Order::from(row);
        info!(order_id = order.id, total = %order.total, change = %order.change, "Order recorded");

        Ok(OrderWithItems { order, items })
    }

    /// Lists orders, newest first.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<Order>> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "{} ORDER BY created_at DESC, id DESC LIMIT ?1",
            SELECT_ORDER
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    /// Gets an order by id.
    pub async fn get(&self, id: i64) -> DbResult<Option<Order>> {
        let row: Option<OrderRow> = sqlx::query_as(&format!("{} WHERE id = ?1", SELECT_ORDER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Order::from))
    }

    /// Gets the items of an order in the order they were rung up.
    pub async fn items(&self, order_id: i64) -> DbResult<Vec<OrderItem>> {
        let rows: Vec<OrderItemRow> = sqlx::query_as(
            r#"
            SELECT id, order_id, product_name, product_price, quantity
            FROM order_items
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(OrderItem::from).collect())
    }

    /// Lists orders newest first, each with its items.
    pub async fn list_with_items(&self, limit: u32) -> DbResult<Vec<OrderWithItems>> {
        let orders = self.list(limit).await?;

        let mut history = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self.items(order.id).await?;
            history.push(OrderWithItems { order, items });
        }

        Ok(history)
    }

    /// Counts orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use kasse_core::{Cart, Money, Product};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn product(id: i64, name: &str, cents: i64) -> Product {
        Product::new(id, name, Money::from_cents(cents), Some(1))
    }

    #[tokio::test]
    async fn test_record_persists_order_and_items() {
        let db = db().await;
        let coffee = product(1, "Kaffee", 250);
        let water = product(2, "Wasser", 100);

        let mut cart = Cart::new();
        cart.add(&coffee);
        cart.add(&coffee);
        cart.add(&water);
        let checkout = cart.checkout(Money::from_cents(1000)).unwrap();

        let recorded = db.orders().record(&checkout).await.unwrap();
        assert_eq!(recorded.order.total, Money::from_cents(600));
        assert_eq!(recorded.order.cash_given, Money::from_cents(1000));
        assert_eq!(recorded.order.change, Money::from_cents(400));
        assert_eq!(recorded.items.len(), 2);

        let stored = db.orders().get(recorded.order.id).await.unwrap().unwrap();
        assert_eq!(stored, recorded.order);

        let items = db.orders().items(stored.id).await.unwrap();
        assert_eq!(items, recorded.items);
        assert_eq!(items[0].product_name, "Kaffee");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].line_total(), Money::from_cents(500));
        assert_eq!(items[1].product_name, "Wasser");
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let db = db().await;
        let mut cart = Cart::new();
        cart.add(&product(1, "Tee", 200));

        let first = db
            .orders()
            .record(&cart.checkout(Money::from_cents(200)).unwrap())
            .await
            .unwrap();
        let second = db
            .orders()
            .record(&cart.checkout(Money::from_cents(500)).unwrap())
            .await
            .unwrap();

        let ids: Vec<i64> = db.orders().list(10).await.unwrap().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![second.order.id, first.order.id]);

        let limited = db.orders().list(1).await.unwrap();
        assert_eq!(limited.len(), 1);

        let history = db.orders().list_with_items(10).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|o| o.items.len() == 1));
        assert_eq!(db.orders().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_items_keep_snapshot_after_product_changes() {
        let db = db().await;
        let drinks = db.categories().insert("Drinks").await.unwrap();
        let mut cola = db
            .products()
            .insert(&kasse_core::NewProduct {
                name: "Cola".to_string(),
                price: Money::from_cents(250),
                category_id: Some(drinks.id),
            })
            .await
            .unwrap();

        let mut cart = Cart::new();
        cart.add(&cola);
        let order = db
            .orders()
            .record(&cart.checkout(Money::from_cents(300)).unwrap())
            .await
            .unwrap();

        cola.price = Money::from_cents(300);
        db.products().update(&cola).await.unwrap();
        db.categories().delete_cascade(drinks.id).await.unwrap();

        let items = db.orders().items(order.order.id).await.unwrap();
        assert_eq!(items[0].product_name, "Cola");
        assert_eq!(items[0].product_price, Money::from_cents(250));
    }
}
