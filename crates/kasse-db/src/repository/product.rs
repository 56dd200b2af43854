//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Listing (all, per category, joined with category names)
//! - CRUD operations
//!
//! Prices live in a `REAL` column; rows convert to [`Money`] on the way
//! out and back on the way in.

use sqlx::SqlitePool;
use tracing::debug;

use super::{money_from_real, money_to_real, price_from_real};
use crate::error::{DbError, DbResult};
use kasse_core::{Money, NewProduct, Product, ProductListing};

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: f64,
    category_id: Option<i64>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: price_from_real(row.id, row.price),
            category_id: row.category_id,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductListingRow {
    #[sqlx(flatten)]
    product: ProductRow,
    category_name: Option<String>,
}

impl From<ProductListingRow> for ProductListing {
    fn from(row: ProductListingRow) -> Self {
        ProductListing {
            product: row.product.into(),
            category_name: row.category_name,
        }
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
/// let drinks = repo.list_by_category(drinks_id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, price, category_id
            FROM products
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Lists the products of one category ordered by name.
    pub async fn list_by_category(&self, category_id: i64) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, price, category_id
            FROM products
            WHERE category_id = ?1
            ORDER BY name
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Lists all products with their category name, ordered by product name.
    ///
    /// A `LEFT JOIN`, so products whose category is gone still appear with
    /// `category_name: None`.
    pub async fn list_with_category(&self) -> DbResult<Vec<ProductListing>> {
        let rows: Vec<ProductListingRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.name, p.price, p.category_id, c.name AS category_name
            FROM products p
            LEFT JOIN categories c ON p.category_id = c.id
            ORDER BY p.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductListing::from).collect())
    }

    /// Gets a product by id.
    pub async fn get(&self, id: i64) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, price, category_id
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The stored product with its assigned id
    /// * `Err(DbError::ForeignKeyViolation)` - `category_id` doesn't exist
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.name, price = %product.price, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, price, category_id)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&product.name)
        .bind(money_to_real(product.price))
        .bind(product.category_id)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: product.name.clone(),
            price: product.price,
            category_id: product.category_id,
        })
    }

    /// Updates name, price and category of an existing product.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                price = ?3,
                category_id = ?4
            WHERE id = ?1
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(money_to_real(product.price))
        .bind(product.category_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product.id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// Past orders are unaffected; their items hold snapshots.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Sum of all product prices; a quick checksum for seeding and tests.
    pub async fn price_sum(&self) -> DbResult<Money> {
        let sum: Option<f64> = sqlx::query_scalar("SELECT SUM(price) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(sum.map(money_from_real).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use kasse_core::validation::MAX_PRICE_CENTS;
    use kasse_core::{Cart, Money, NewProduct};

    async fn db_with_category(name: &str) -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category = db.categories().insert(name).await.unwrap();
        (db, category.id)
    }

    fn new_product(name: &str, cents: i64, category_id: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: Money::from_cents(cents),
            category_id: Some(category_id),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_keeps_exact_price() {
        let (db, drinks) = db_with_category("Drinks").await;

        let cola = db.products().insert(&new_product("Cola", 199, drinks)).await.unwrap();
        let fetched = db.products().get(cola.id).await.unwrap().unwrap();

        assert_eq!(fetched, cola);
        assert_eq!(fetched.price, Money::from_cents(199));
    }

    #[tokio::test]
    async fn test_list_orders_by_name_and_filters_by_category() {
        let (db, drinks) = db_with_category("Drinks").await;
        let bakery = db.categories().insert("Bakery").await.unwrap().id;

        db.products().insert(&new_product("Wasser", 100, drinks)).await.unwrap();
        db.products().insert(&new_product("Brezel", 120, bakery)).await.unwrap();
        db.products().insert(&new_product("Apfelsaft", 220, drinks)).await.unwrap();

        let names: Vec<String> = db.products().list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Apfelsaft", "Brezel", "Wasser"]);

        let drink_names: Vec<String> = db
            .products()
            .list_by_category(drinks)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(drink_names, vec!["Apfelsaft", "Wasser"]);
    }

    #[tokio::test]
    async fn test_list_with_category_joins_names() {
        let (db, drinks) = db_with_category("Drinks").await;
        db.products().insert(&new_product("Cola", 250, drinks)).await.unwrap();
        db.products()
            .insert(&NewProduct {
                name: "Loose".to_string(),
                price: Money::from_cents(50),
                category_id: None,
            })
            .await
            .unwrap();

        let listings = db.products().list_with_category().await.unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].product.name, "Cola");
        assert_eq!(listings[0].category_name.as_deref(), Some("Drinks"));
        assert_eq!(listings[1].category_name, None);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (db, drinks) = db_with_category("Drinks").await;
        let mut cola = db.products().insert(&new_product("Cola", 250, drinks)).await.unwrap();

        cola.name = "Cola Zero".to_string();
        cola.price = Money::from_cents(270);
        db.products().update(&cola).await.unwrap();
        assert_eq!(db.products().get(cola.id).await.unwrap(), Some(cola.clone()));

        db.products().delete(cola.id).await.unwrap();
        assert_eq!(db.products().get(cola.id).await.unwrap(), None);

        assert!(matches!(
            db.products().delete(cola.id).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            db.products().update(&cola).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_insert_with_unknown_category_is_rejected() {
        let (db, _) = db_with_category("Drinks").await;

        let err = db.products().insert(&new_product("Ghost", 100, 999)).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_count_and_price_sum() {
        let (db, drinks) = db_with_category("Drinks").await;
        assert_eq!(db.products().price_sum().await.unwrap(), Money::zero());

        db.products().insert(&new_product("A", 10, drinks)).await.unwrap();
        db.products().insert(&new_product("B", 20, drinks)).await.unwrap();

        assert_eq!(db.products().count().await.unwrap(), 2);
        assert_eq!(db.products().price_sum().await.unwrap(), Money::from_cents(30));
    }

    #[tokio::test]
    async fn test_legacy_huge_price_loads_clamped_and_cart_stays_sane() {
        let (db, drinks) = db_with_category("Drinks").await;
        sqlx::query("INSERT INTO products (name, price, category_id) VALUES ('Gold', 1e17, ?1)")
            .bind(drinks)
            .execute(db.pool())
            .await
            .unwrap();

        let products = db.products().list().await.unwrap();
        let gold = &products[0];
        assert_eq!(gold.price, Money::from_cents(MAX_PRICE_CENTS));

        let mut cart = Cart::new();
        cart.add(gold);
        cart.add(gold);
        assert_eq!(cart.total(), Money::from_cents(2 * MAX_PRICE_CENTS));
        assert!(cart.total().is_positive());
    }
}
