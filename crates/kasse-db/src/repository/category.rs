//! # Category Repository
//!
//! ## Cascade Delete
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  delete_cascade(7)                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │  DELETE FROM products   WHERE category_id = 7   (n rows)                │
//! │  DELETE FROM categories WHERE id = 7            (1 row, else NotFound)  │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The schema declares no `ON DELETE CASCADE`, so the app removes the
//! children itself. Both statements share a transaction: either the
//! category and all of its products go, or nothing does.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use kasse_core::Category;

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
        }
    }
}

/// Outcome of [`CategoryRepository::delete_cascade`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeDelete {
    pub category_id: i64,
    pub products_deleted: u64,
}

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists all categories ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let rows: Vec<CategoryRow> =
            sqlx::query_as("SELECT id, name FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Gets a category by id.
    pub async fn get(&self, id: i64) -> DbResult<Option<Category>> {
        let row: Option<CategoryRow> =
            sqlx::query_as("SELECT id, name FROM categories WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Category::from))
    }

    /// Inserts a category. The name is stored as given; validate first.
    pub async fn insert(&self, name: &str) -> DbResult<Category> {
        debug!(name = %name, "Inserting category");

        let result = sqlx::query("INSERT INTO categories (name) VALUES (?1)")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    /// Renames a category.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No category with this id
    pub async fn rename(&self, id: i64, name: &str) -> DbResult<Category> {
        debug!(id = %id, name = %name, "Renaming category");

        let result = sqlx::query("UPDATE categories SET name = ?2 WHERE id = ?1")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(Category {
            id,
            name: name.to_string(),
        })
    }

    /// Deletes a category together with every product in it.
    ///
    /// ## Returns
    /// * `Ok(CascadeDelete)` - How many products went with it
    /// * `Err(DbError::NotFound)` - No category with this id; nothing deleted
    pub async fn delete_cascade(&self, id: i64) -> DbResult<CascadeDelete> {
        debug!(id = %id, "Deleting category with its products");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let products = sqlx::query("DELETE FROM products WHERE category_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let category = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if category.rows_affected() == 0 {
            // dropping `tx` rolls back the product delete
            return Err(DbError::not_found("Category", id));
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let outcome = CascadeDelete {
            category_id: id,
            products_deleted: products.rows_affected(),
        };
        info!(
            category_id = id,
            products_deleted = outcome.products_deleted,
            "Category deleted"
        );
        Ok(outcome)
    }

    /// Counts categories.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
