//! # CLI Commands
//!
//! One handler per subcommand. Each loads the screen it needs, applies the
//! change and prints the result as text or, with `--json`, as JSON.

use std::io::{self, BufRead, Write};

use serde::Serialize;

use crate::cli::{CategoryCommands, DeleteArgs, ProductCommands};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::screens::{HistoryScreen, ProductForm, ProductsScreen};
use kasse_core::{Category, ProductListing};
use kasse_db::Database;

/// Output switches shared by all handlers.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Deleted {
    id: i64,
    products_deleted: u64,
}

pub async fn categories(db: &Database, command: CategoryCommands, output: Output) -> AppResult<()> {
    let mut screen = ProductsScreen::load(db.clone()).await?;

    match command {
        CategoryCommands::List => {
            if output.json {
                return print_json(&screen.categories());
            }
            if screen.categories().is_empty() {
                println!("No categories yet. Add one with: kasse categories add <NAME>");
            }
            for category in screen.categories() {
                let count = screen.listings_in(category.id).len();
                println!("{:>4}  {:<24} {} products", category.id, category.name, count);
            }
        }
        CategoryCommands::Add { name } => {
            let category = screen.add_category(&name).await?;
            print_category(&category, "Added", output)?;
        }
        CategoryCommands::Rename { id, name } => {
            let category = screen.rename_category(id, &name).await?;
            print_category(&category, "Renamed", output)?;
        }
        CategoryCommands::Delete(DeleteArgs { id, yes }) => {
            let category = screen
                .categories()
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or_else(|| AppError::not_found("Category", id))?;
            let doomed = screen.listings_in(id).len();

            let question = format!(
                "Delete category '{}' and its {} product(s)?",
                category.name, doomed
            );
            if !yes && !confirm(&question, io::stdin().lock(), io::stderr())? {
                eprintln!("Cancelled");
                return Ok(());
            }

            let outcome = screen.delete_category(id).await?;
            if output.json {
                return print_json(&Deleted {
                    id,
                    products_deleted: outcome.products_deleted,
                });
            }
            println!(
                "Deleted category '{}' with {} product(s)",
                category.name, outcome.products_deleted
            );
        }
    }

    Ok(())
}

pub async fn products(
    db: &Database,
    config: &AppConfig,
    command: ProductCommands,
    output: Output,
) -> AppResult<()> {
    let mut screen = ProductsScreen::load(db.clone()).await?;

    match command {
        ProductCommands::List { category } => {
            let listings: Vec<&ProductListing> = match category {
                Some(id) => {
                    screen.select_category(Some(id))?;
                    screen.listings_in(id)
                }
                None => screen.listings().iter().collect(),
            };

            if output.json {
                return print_json(&listings);
            }
            if listings.is_empty() {
                println!("No products");
            }
            for listing in listings {
                print_listing(listing, config);
            }
        }
        ProductCommands::Add {
            name,
            price,
            category,
        } => {
            let form = ProductForm::new(name, price).in_category(category);
            let product = screen.save_product(&form).await?;
            if output.json {
                return print_json(&product);
            }
            println!(
                "Added product {} '{}' at {}",
                product.id,
                product.name,
                config.format_currency(product.price)
            );
        }
        ProductCommands::Edit {
            id,
            name,
            price,
            category,
        } => {
            let mut form = screen.edit_form(id)?;
            form.name = name;
            form.price_text = price;
            if category.is_some() {
                form.category_id = category;
            }

            let product = screen.save_product(&form).await?;
            if output.json {
                return print_json(&product);
            }
            println!(
                "Updated product {} '{}' at {}",
                product.id,
                product.name,
                config.format_currency(product.price)
            );
        }
        ProductCommands::Delete(DeleteArgs { id, yes }) => {
            let name = screen
                .product(id)
                .map(|p| p.name.clone())
                .ok_or_else(|| AppError::not_found("Product", id))?;

            let question = format!("Delete product '{}'?", name);
            if !yes && !confirm(&question, io::stdin().lock(), io::stderr())? {
                eprintln!("Cancelled");
                return Ok(());
            }

            screen.delete_product(id).await?;
            if output.json {
                return print_json(&Deleted {
                    id,
                    products_deleted: 1,
                });
            }
            println!("Deleted product '{}'", name);
        }
    }

    Ok(())
}

pub async fn history(
    db: &Database,
    config: &AppConfig,
    limit: u32,
    output: Output,
) -> AppResult<()> {
    let screen = HistoryScreen::load(db, limit).await?;

    if output.json {
        return print_json(&screen.orders());
    }
    if screen.is_empty() {
        println!("No orders yet");
        return Ok(());
    }

    println!("{}: last {} order(s)", config.store_name, screen.orders().len());
    for entry in screen.orders() {
        let order = &entry.order;
        println!(
            "#{:<5} {}  total {}  given {}  change {}",
            order.id,
            order.created_at.format("%Y-%m-%d %H:%M"),
            config.format_currency(order.total),
            config.format_currency(order.cash_given),
            config.format_currency(order.change)
        );
        for item in &entry.items {
            println!(
                "         {:>3} x {:<24} {:>10}",
                item.quantity,
                item.product_name,
                config.format_currency(item.line_total())
            );
        }
    }
    println!("Revenue: {}", config.format_currency(screen.revenue()));

    Ok(())
}

fn print_category(category: &Category, verb: &str, output: Output) -> AppResult<()> {
    if output.json {
        return print_json(category);
    }
    println!("{} category {} '{}'", verb, category.id, category.name);
    Ok(())
}

fn print_listing(listing: &ProductListing, config: &AppConfig) {
    println!(
        "{:>4}  {:<24} {:>10}  {}",
        listing.product.id,
        listing.product.name,
        config.format_currency(listing.product.price),
        listing.category_name.as_deref().unwrap_or("-")
    );
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Asks a yes/no question. Anything but an explicit yes is a no.
pub fn confirm<R: BufRead, W: Write>(question: &str, mut input: R, mut out: W) -> io::Result<bool> {
    write!(out, "{} [y/N] ", question)?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "j" | "ja"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(answer: &str) -> bool {
        let mut out = Vec::new();
        let result = confirm("Delete?", answer.as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Delete? [y/N] ");
        result
    }

    #[test]
    fn test_confirm_accepts_explicit_yes_only() {
        assert!(ask("y\n"));
        assert!(ask("YES\n"));
        assert!(ask(" ja \n"));
        assert!(!ask("\n"));
        assert!(!ask("n\n"));
        assert!(!ask("maybe\n"));
        assert!(!ask(""));
    }
}
