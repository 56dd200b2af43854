//! # Demo Data Seeder
//!
//! Fills a database with a small café catalog for trying out the register.
//!
//! ## Usage
//! ```bash
//! cargo run -p kasse-db --bin seed
//! cargo run -p kasse-db --bin seed -- --db ./data/kasse.db
//! ```

use std::env;

use kasse_core::{Money, NewProduct};
use kasse_db::{Database, DbConfig};

/// Categories with their products and prices in cents.
const CATALOG: &[(&str, &[(&str, i64)])] = &[
    (
        "Getränke",
        &[
            ("Kaffee", 250),
            ("Cappuccino", 320),
            ("Tee", 200),
            ("Wasser", 100),
            ("Apfelschorle", 280),
            ("Cola", 250),
        ],
    ),
    (
        "Backwaren",
        &[
            ("Brezel", 120),
            ("Croissant", 180),
            ("Brötchen", 60),
            ("Laugenstange", 140),
        ],
    ),
    (
        "Snacks",
        &[
            ("Apfelkuchen", 350),
            ("Käsekuchen", 380),
            ("Muffin", 290),
            ("Schokoriegel", 150),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./kasse_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kasse Demo Data Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kasse_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Kasse Demo Data Seeder");
    println!("======================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected, tables ready");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let mut generated = 0;
    for (category_name, products) in CATALOG {
        let category = db.categories().insert(category_name).await?;

        for (name, cents) in products.iter() {
            let product = NewProduct {
                name: name.to_string(),
                price: Money::from_cents(*cents),
                category_id: Some(category.id),
            };

            if let Err(e) = db.products().insert(&product).await {
                eprintln!("Failed to insert {}: {}", product.name, e);
                continue;
            }
            generated += 1;
        }

        println!("  {}: {} products", category.name, products.len());
    }

    println!();
    println!("✓ Inserted {} products", generated);
    println!("  Price checksum: {}", db.products().price_sum().await?);

    db.close().await;
    Ok(())
}
