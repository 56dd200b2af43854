//! # kasse-db: Database Layer for Kasse
//!
//! SQLite storage for categories, products and orders, accessed through
//! sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Kasse Data Flow                                │
//! │                                                                         │
//! │  Screen (KasseScreen::checkout)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kasse-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │    Schema    │  │   │
//! │  │   │   (pool.rs)   │    │                │    │ (schema.rs)  │  │   │
//! │  │   │               │    │ CategoryRepo   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo    │    │ 4 tables,    │  │   │
//! │  │   │               │    │ OrderRepo      │    │ IF NOT EXISTS│  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (kasse.db in the platform data directory)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`schema`] - Table definitions and the schema initializer
//! - [`error`] - Database error types
//! - [`repository`] - Category, product and order repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kasse_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("kasse.db")).await?;
//! let drinks = db.categories().insert("Getränke").await?;
//! let products = db.products().list_by_category(drinks.id).await?;
//! ```

pub mod error;
pub mod pool;
pub mod repository;
pub mod schema;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::category::{CascadeDelete, CategoryRepository};
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
