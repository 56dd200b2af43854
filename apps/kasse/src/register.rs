//! # Interactive Register
//!
//! Drives a [`KasseScreen`] from text commands, one per line.
//!
//! ```text
//! > cat 2          select category 2
//! > add 5          one more of product 5
//! > remove 5       one less of product 5
//! > clear          empty the cart
//! > show           categories, products and cart
//! > checkout 10    pay with 10.00 cash
//! > quit
//! ```

use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::debug;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::screens::KasseScreen;
use kasse_core::validation::parse_price;
use kasse_core::Money;

/// One line of register input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterCommand {
    SelectCategory(i64),
    Add(i64),
    Remove(i64),
    Clear,
    Show,
    Checkout(Money),
    Help,
    Quit,
}

impl FromStr for RegisterCommand {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next();

        if parts.next().is_some() {
            return Err(AppError::invalid_command(format!("Too many arguments: {}", line.trim())));
        }

        match (verb.as_str(), arg) {
            ("cat" | "category", Some(id)) => Ok(RegisterCommand::SelectCategory(parse_id(id)?)),
            ("add", Some(id)) => Ok(RegisterCommand::Add(parse_id(id)?)),
            ("remove" | "rm", Some(id)) => Ok(RegisterCommand::Remove(parse_id(id)?)),
            ("checkout" | "pay", Some(cash)) => parse_price(cash)
                .map(RegisterCommand::Checkout)
                .map_err(|_| AppError::validation(format!("Invalid cash amount: {}", cash))),
            ("clear", None) => Ok(RegisterCommand::Clear),
            ("show" | "", None) => Ok(RegisterCommand::Show),
            ("help" | "?", None) => Ok(RegisterCommand::Help),
            ("quit" | "exit" | "q", None) => Ok(RegisterCommand::Quit),
            ("cat" | "category" | "add" | "remove" | "rm" | "checkout" | "pay", None) => Err(
                AppError::invalid_command(format!("'{}' needs an argument", verb)),
            ),
            _ => Err(AppError::invalid_command(format!(
                "Unknown command: {} (try 'help')",
                line.trim()
            ))),
        }
    }
}

fn parse_id(text: &str) -> AppResult<i64> {
    text.parse()
        .map_err(|_| AppError::invalid_command(format!("Not an id: {}", text)))
}

const HELP: &str = "\
Commands:
  cat <ID>         select a category
  add <ID>         add one unit of a product
  remove <ID>      remove one unit of a product
  clear            empty the cart
  show             show products and cart
  checkout <CASH>  pay and record the order
  quit             leave the register";

/// Runs the register until `quit` or end of input.
///
/// Errors from single commands are printed and the loop goes on; only
/// failures to write output end it.
pub async fn run<R: BufRead, W: Write>(
    screen: &mut KasseScreen,
    config: &AppConfig,
    input: R,
    mut out: W,
) -> AppResult<()> {
    writeln!(out, "{}: register open", config.store_name)?;
    render_screen(screen, config, &mut out)?;
    prompt(&mut out)?;

    for line in input.lines() {
        let line = line?;
        debug!(line = %line, "Register input");

        let command = match line.parse::<RegisterCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e.message)?;
                prompt(&mut out)?;
                continue;
            }
        };

        if command == RegisterCommand::Quit {
            break;
        }

        if let Err(e) = apply(screen, config, command, &mut out).await {
            writeln!(out, "{}", e.message)?;
        }
        prompt(&mut out)?;
    }

    if !screen.cart().is_empty() {
        writeln!(
            out,
            "Open cart with {} discarded",
            config.format_currency(screen.total())
        )?;
    }
    writeln!(out, "Register closed")?;
    Ok(())
}

async fn apply<W: Write>(
    screen: &mut KasseScreen,
    config: &AppConfig,
    command: RegisterCommand,
    out: &mut W,
) -> AppResult<()> {
    match command {
        RegisterCommand::SelectCategory(id) => {
            screen.select_category(id)?;
            render_products(screen, config, out)?;
        }
        RegisterCommand::Add(id) => {
            screen.add_to_cart(id)?;
            render_cart(screen, config, out)?;
        }
        RegisterCommand::Remove(id) => {
            if !screen.remove_from_cart(id) {
                writeln!(out, "Product {} is not in the cart", id)?;
            }
            render_cart(screen, config, out)?;
        }
        RegisterCommand::Clear => {
            screen.clear_cart();
            render_cart(screen, config, out)?;
        }
        RegisterCommand::Show => render_screen(screen, config, out)?,
        RegisterCommand::Checkout(cash) => {
            let order = screen.checkout(cash).await?;
            writeln!(
                out,
                "Order #{}: total {}, given {}, change {}",
                order.order.id,
                config.format_currency(order.order.total),
                config.format_currency(order.order.cash_given),
                config.format_currency(order.order.change)
            )?;
        }
        RegisterCommand::Help => writeln!(out, "{}", HELP)?,
        RegisterCommand::Quit => {}
    }
    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> AppResult<()> {
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

fn render_screen<W: Write>(screen: &KasseScreen, config: &AppConfig, out: &mut W) -> AppResult<()> {
    render_products(screen, config, out)?;
    render_cart(screen, config, out)
}

fn render_products<W: Write>(
    screen: &KasseScreen,
    config: &AppConfig,
    out: &mut W,
) -> AppResult<()> {
    let tabs: Vec<String> = screen
        .categories()
        .iter()
        .map(|c| {
            let marker = if screen.selected_category() == Some(c.id) { "*" } else { "" };
            format!("[{} {}{}]", c.id, c.name, marker)
        })
        .collect();
    if !tabs.is_empty() {
        writeln!(out, "{}", tabs.join(" "))?;
    }

    let products = screen.visible_products();
    if products.is_empty() {
        writeln!(out, "  (no products)")?;
    }
    for product in products {
        writeln!(
            out,
            "  {:>4}  {:<24} {:>10}",
            product.id,
            product.name,
            config.format_currency(product.price)
        )?;
    }
    Ok(())
}

fn render_cart<W: Write>(screen: &KasseScreen, config: &AppConfig, out: &mut W) -> AppResult<()> {
    let cart = screen.cart();
    if cart.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }

    writeln!(out, "Cart:")?;
    for line in cart.lines() {
        writeln!(
            out,
            "  {:>4}  {:<24} x{:<3} {:>10}",
            line.product.id,
            line.product.name,
            line.quantity,
            config.format_currency(line.line_total())
        )?;
    }
    writeln!(out, "  TOTAL {:>39}", config.format_currency(cart.total()))?;
    Ok(())
}
