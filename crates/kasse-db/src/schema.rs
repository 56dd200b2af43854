//! # Schema Initializer
//!
//! Creates the four Kasse tables if they are missing.
//!
//! ## How It Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  App Startup                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CREATE TABLE IF NOT EXISTS categories   ─┐                             │
//! │  CREATE TABLE IF NOT EXISTS products      │  one transaction,           │
//! │  CREATE TABLE IF NOT EXISTS orders        │  in dependency order        │
//! │  CREATE TABLE IF NOT EXISTS order_items  ─┘                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  App continues startup                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There are no migrations. Every statement is a no-op against an existing
//! table, so this runs on every start; changing a table's shape means
//! starting from a fresh database file.
//!
//! Money columns are `REAL` holding whole currency units (2.5 = 2.50), the
//! layout existing `kasse.db` files already use.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// The tables, in the order they are created.
pub const TABLES: [&str; 4] = ["categories", "products", "orders", "order_items"];

/// Table definitions, parents before children.
const STATEMENTS: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        price REAL NOT NULL,
        category_id INTEGER,
        FOREIGN KEY (category_id) REFERENCES categories(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        total REAL NOT NULL,
        cash_given REAL NOT NULL,
        change REAL NOT NULL,
        created_at TEXT DEFAULT (datetime('now'))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS order_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        order_id INTEGER,
        product_name TEXT NOT NULL,
        product_price REAL NOT NULL,
        quantity INTEGER NOT NULL,
        FOREIGN KEY (order_id) REFERENCES orders(id)
    )
    "#,
];

/// Creates any missing tables.
///
/// ## Safety
/// - Idempotent: safe to run on every start
/// - All-or-nothing: the statements share one transaction
pub async fn initialize(pool: &SqlitePool) -> DbResult<()> {
    info!("Initializing database schema");

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| DbError::SchemaFailed(e.to_string()))?;

    for (table, statement) in TABLES.iter().zip(STATEMENTS) {
        debug!(table = %table, "Ensuring table exists");
        sqlx::query(statement)
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::SchemaFailed(format!("{}: {}", table, e)))?;
    }

    tx.commit()
        .await
        .map_err(|e| DbError::SchemaFailed(e.to_string()))?;

    info!("Schema ready");
    Ok(())
}

/// Lists the user tables present in the database, sorted by name.
///
/// ## Usage
/// For diagnostics and tests.
pub async fn table_names(pool: &SqlitePool) -> DbResult<Vec<String>> {
    let names: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT name FROM sqlite_master
        WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(names)
}
