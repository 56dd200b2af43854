//! # Products Screen
//!
//! Catalog maintenance: categories on the left, the product list and an
//! add/edit form on the right.
//!
//! ## Saving a Product
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductForm { editing_id, name, price_text, category_id }              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_name(name)      → "name is required" / too long               │
//! │  parse_price(price_text)  → "price is required" / invalid / range       │
//! │  category: form → selected → first   → "category is required"           │
//! │       │                                                                 │
//! │       ├── editing_id = None      → INSERT                               │
//! │       └── editing_id = Some(id)  → UPDATE (NotFound if gone)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deletes are immediate here; the CLI asks for confirmation first.

use tracing::{debug, info};

use crate::error::AppResult;
use kasse_core::validation::{parse_price, validate_name};
use kasse_core::{Category, CoreError, NewProduct, Product, ProductListing, ValidationError};
use kasse_db::{CascadeDelete, Database};

/// The add/edit product form, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    /// Product being edited; `None` creates a new one.
    pub editing_id: Option<i64>,
    pub name: String,
    pub price_text: String,
    pub category_id: Option<i64>,
}

impl ProductForm {
    /// An empty form for a new product.
    pub fn new(name: impl Into<String>, price_text: impl Into<String>) -> Self {
        ProductForm {
            editing_id: None,
            name: name.into(),
            price_text: price_text.into(),
            category_id: None,
        }
    }

    /// A form prefilled from an existing product.
    pub fn edit(product: &Product) -> Self {
        ProductForm {
            editing_id: Some(product.id),
            name: product.name.clone(),
            price_text: product.price.to_string(),
            category_id: product.category_id,
        }
    }

    pub fn in_category(mut self, category_id: Option<i64>) -> Self {
        self.category_id = category_id;
        self
    }
}

/// State of the Products screen.
#[derive(Debug)]
pub struct ProductsScreen {
    db: Database,
    categories: Vec<Category>,
    listings: Vec<ProductListing>,
    selected_category: Option<i64>,
}

impl ProductsScreen {
    pub async fn load(db: Database) -> AppResult<Self> {
        let mut screen = ProductsScreen {
            db,
            categories: Vec::new(),
            listings: Vec::new(),
            selected_category: None,
        };
        screen.reload().await?;
        Ok(screen)
    }

    pub async fn reload(&mut self) -> AppResult<()> {
        self.categories = self.db.categories().list().await?;
        self.listings = self.db.products().list_with_category().await?;

        if let Some(id) = self.selected_category {
            if !self.categories.iter().any(|c| c.id == id) {
                self.selected_category = None;
            }
        }

        debug!(
            categories = self.categories.len(),
            products = self.listings.len(),
            "Products screen loaded"
        );
        Ok(())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All products with their category names, ordered by product name.
    pub fn listings(&self) -> &[ProductListing] {
        &self.listings
    }

    /// Listings of one category.
    pub fn listings_in(&self, category_id: i64) -> Vec<&ProductListing> {
        self.listings
            .iter()
            .filter(|l| l.product.is_in_category(category_id))
            .collect()
    }

    pub fn selected_category(&self) -> Option<i64> {
        self.selected_category
    }

    pub fn select_category(&mut self, category_id: Option<i64>) -> AppResult<()> {
        if let Some(id) = category_id {
            self.require_category(id)?;
        }
        self.selected_category = category_id;
        Ok(())
    }

    /// Looks up a loaded product.
    pub fn product(&self, product_id: i64) -> Option<&Product> {
        self.listings
            .iter()
            .map(|l| &l.product)
            .find(|p| p.id == product_id)
    }

    /// An edit form prefilled from a loaded product.
    ///
    /// A category id that no longer exists is left out, so saving falls
    /// back to the selected or first category like a new product does.
    pub fn edit_form(&self, product_id: i64) -> AppResult<ProductForm> {
        let product = self
            .product(product_id)
            .ok_or(CoreError::ProductNotFound(product_id))?;

        let mut form = ProductForm::edit(product);
        if form
            .category_id
            .is_some_and(|id| !self.categories.iter().any(|c| c.id == id))
        {
            form.category_id = None;
        }
        Ok(form)
    }

    /// Creates a category from the typed name (trimmed; empty rejected).
    pub async fn add_category(&mut self, name: &str) -> AppResult<Category> {
        let name = validate_name("name", name)?;
        let category = self.db.categories().insert(&name).await?;

        info!(id = category.id, name = %category.name, "Category added");
        self.reload().await?;
        Ok(category)
    }

    pub async fn rename_category(&mut self, category_id: i64, name: &str) -> AppResult<Category> {
        let name = validate_name("name", name)?;
        let category = self.db.categories().rename(category_id, &name).await?;

        self.reload().await?;
        Ok(category)
    }

    /// Deletes a category and every product in it.
    pub async fn delete_category(&mut self, category_id: i64) -> AppResult<CascadeDelete> {
        let outcome = self.db.categories().delete_cascade(category_id).await?;

        self.reload().await?;
        Ok(outcome)
    }

    /// Inserts or updates the product described by the form.
    pub async fn save_product(&mut self, form: &ProductForm) -> AppResult<Product> {
        let name = validate_name("name", &form.name)?;
        let price = parse_price(&form.price_text)?;
        let category_id = self.resolve_category(form.category_id)?;

        let product = match form.editing_id {
            Some(id) => {
                let product = Product::new(id, name, price, Some(category_id));
                self.db.products().update(&product).await?;
                info!(id, "Product updated");
                product
            }
            None => {
                let product = self
                    .db
                    .products()
                    .insert(&NewProduct {
                        name,
                        price,
                        category_id: Some(category_id),
                    })
                    .await?;
                info!(id = product.id, "Product added");
                product
            }
        };

        self.reload().await?;
        Ok(product)
    }

    pub async fn delete_product(&mut self, product_id: i64) -> AppResult<()> {
        self.db.products().delete(product_id).await?;
        info!(id = product_id, "Product deleted");

        self.reload().await?;
        Ok(())
    }

    /// Picks the category for a save: the form's, else the selected one,
    /// else the first one.
    fn resolve_category(&self, from_form: Option<i64>) -> AppResult<i64> {
        if let Some(id) = from_form {
            self.require_category(id)?;
            return Ok(id);
        }

        self.selected_category
            .or_else(|| self.categories.first().map(|c| c.id))
            .ok_or_else(|| ValidationError::required("category").into())
    }

    fn require_category(&self, category_id: i64) -> AppResult<()> {
        if self.categories.iter().any(|c| c.id == category_id) {
            Ok(())
        } else {
            Err(CoreError::CategoryNotFound(category_id).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use kasse_core::Money;
    use kasse_db::DbConfig;

    async fn screen() -> ProductsScreen {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        ProductsScreen::load(db).await.unwrap()
    }

    #[tokio::test]
    async fn test_add_category_trims_and_rejects_empty() {
        let mut screen = screen().await;

        let drinks = screen.add_category("  Getränke ").await.unwrap();
        assert_eq!(drinks.name, "Getränke");
        assert_eq!(screen.categories().len(), 1);

        let err = screen.add_category("   ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(screen.categories().len(), 1);
    }

    #[tokio::test]
    async fn test_save_product_falls_back_to_first_category() {
        let mut screen = screen().await;
        let snacks = screen.add_category("Snacks").await.unwrap();
        let bakery = screen.add_category("Backwaren").await.unwrap();

        let brezel = screen.save_product(&ProductForm::new("Brezel", "1,20")).await.unwrap();
        assert_eq!(brezel.category_id, Some(bakery.id));
        assert_eq!(brezel.price, Money::from_cents(120));

        screen.select_category(Some(snacks.id)).unwrap();
        let muffin = screen.save_product(&ProductForm::new("Muffin", "2.90")).await.unwrap();
        assert_eq!(muffin.category_id, Some(snacks.id));

        let form = ProductForm::new("Croissant", "1.8").in_category(Some(bakery.id));
        let croissant = screen.save_product(&form).await.unwrap();
        assert_eq!(croissant.category_id, Some(bakery.id));
        assert_eq!(screen.listings_in(bakery.id).len(), 2);
    }

    #[tokio::test]
    async fn test_save_product_rejects_bad_input() {
        let mut screen = screen().await;

        let err = screen.save_product(&ProductForm::new("Brezel", "1.20")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "category is required");

        screen.add_category("Backwaren").await.unwrap();
        for (name, price) in [("", "1.20"), ("Brezel", ""), ("Brezel", "abc")] {
            let err = screen.save_product(&ProductForm::new(name, price)).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError, "{:?} {:?}", name, price);
        }

        let form = ProductForm::new("Brezel", "1.20").in_category(Some(999));
        let err = screen.save_product(&form).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        assert!(screen.listings().is_empty());
    }

    #[tokio::test]
    async fn test_edit_product() {
        let mut screen = screen().await;
        let drinks = screen.add_category("Getränke").await.unwrap();
        let cola = screen.save_product(&ProductForm::new("Cola", "2.50")).await.unwrap();

        let mut form = screen.edit_form(cola.id).unwrap();
        assert_eq!(form.price_text, "2.50");
        form.name = "Cola Zero".to_string();
        form.price_text = "2,70".to_string();

        let saved = screen.save_product(&form).await.unwrap();
        assert_eq!(saved.id, cola.id);

        let listing = &screen.listings()[0];
        assert_eq!(listing.product.name, "Cola Zero");
        assert_eq!(listing.product.price, Money::from_cents(270));
        assert_eq!(listing.category_name.as_deref(), Some(drinks.name.as_str()));

        screen.delete_product(cola.id).await.unwrap();
        let err = screen.save_product(&form).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_edit_form_drops_missing_category() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query("PRAGMA foreign_keys = OFF")
            .execute(db.pool())
            .await
            .unwrap();
        sqlx::query("INSERT INTO products (name, price, category_id) VALUES ('Brezel', 1.2, 999)")
            .execute(db.pool())
            .await
            .unwrap();

        let mut screen = ProductsScreen::load(db).await.unwrap();
        let bakery = screen.add_category("Backwaren").await.unwrap();
        let id = screen.listings()[0].product.id;

        let mut form = screen.edit_form(id).unwrap();
        assert_eq!(form.category_id, None);
        form.price_text = "1,30".to_string();

        let saved = screen.save_product(&form).await.unwrap();
        assert_eq!(saved.category_id, Some(bakery.id));
        assert_eq!(saved.price, Money::from_cents(130));

        let err = screen.edit_form(12345).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_delete_category_cascades_and_clears_selection() {
        let mut screen = screen().await;
        let drinks = screen.add_category("Getränke").await.unwrap();
        let bakery = screen.add_category("Backwaren").await.unwrap();

        screen.select_category(Some(drinks.id)).unwrap();
        screen.save_product(&ProductForm::new("Cola", "2.50")).await.unwrap();
        screen.save_product(&ProductForm::new("Tee", "2.00")).await.unwrap();
        let form = ProductForm::new("Brezel", "1.20").in_category(Some(bakery.id));
        screen.save_product(&form).await.unwrap();

        let outcome = screen.delete_category(drinks.id).await.unwrap();
        assert_eq!(outcome.products_deleted, 2);
        assert_eq!(screen.selected_category(), None);
        assert_eq!(screen.listings().len(), 1);
        assert_eq!(screen.listings()[0].product.name, "Brezel");

        let err = screen.delete_category(drinks.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_rename_category() {
        let mut screen = screen().await;
        let drinks = screen.add_category("Drinks").await.unwrap();

        let renamed = screen.rename_category(drinks.id, " Getränke ").await.unwrap();
        assert_eq!(renamed.name, "Getränke");
        assert_eq!(screen.categories()[0].name, "Getränke");
    }
}
