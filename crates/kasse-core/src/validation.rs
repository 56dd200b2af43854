//! # Validation Module
//!
//! Rules for what the Products screen forms accept.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Screen form (text fields)                                     │
//! │  └── THIS MODULE: trim names, parse price text into Money               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                             │
//! │  └── NOT NULL constraints                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasse_core::validation::{parse_price, validate_name};
//!
//! assert_eq!(validate_name("name", "  Brezel ").unwrap(), "Brezel");
//! assert_eq!(parse_price("2,50").unwrap().cents(), 250);
//! assert!(parse_price("abc").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted category or product name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Highest accepted price: 999999.99.
pub const MAX_PRICE_CENTS: i64 = 99_999_999;

// =============================================================================
// Names
// =============================================================================

/// Validates a category or product name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_NAME_LEN`] characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required(field));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Prices
// =============================================================================

/// Parses price text typed by the user into [`Money`].
///
/// Accepts whole numbers and numbers with one decimal separator (`.` or
/// `,`) followed by one or two digits: `2`, `2.5`, `2,50`, `.99`.
///
/// ## Rules
/// - Empty text → `Required`
/// - Anything else that is not a plain decimal → `InvalidFormat`
/// - Negative or above [`MAX_PRICE_CENTS`] → `OutOfRange`
///
/// ## User Workflow
/// ```text
/// Price field: "2,50"
///      │
///      ▼
/// parse_price ← THIS FUNCTION
///      │
///      ├── "" ──────► Error: "price is required"
///      ├── "2.5x" ──► Error: "price has invalid format"
///      └── OK ──────► Money(250)
/// ```
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::required("price"));
    }

    if text.starts_with('-') {
        return Err(price_out_of_range());
    }

    let (whole, frac) = match text.find(|c: char| c == '.' || c == ',') {
        Some(pos) => (&text[..pos], &text[pos + 1..]),
        None => (text, ""),
    };

    let has_separator = whole.len() < text.len();
    let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    if !digits_only(whole) || !digits_only(frac) {
        return Err(invalid_price("must be a number like 2.50"));
    }
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid_price("must be a number like 2.50"));
    }
    if has_separator && frac.is_empty() {
        return Err(invalid_price("missing digits after the decimal separator"));
    }
    if frac.len() > 2 {
        return Err(invalid_price("at most 2 decimal places"));
    }

    // Bounded length keeps the integer parse below from overflowing.
    if whole.trim_start_matches('0').len() > 6 {
        return Err(price_out_of_range());
    }

    let major: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid_price("must be a number"))?
    };
    let minor: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| invalid_price("must be a number"))? * 10,
        _ => frac.parse().map_err(|_| invalid_price("must be a number"))?,
    };

    let price = Money::from_major_minor(major, minor);
    if price.cents() > MAX_PRICE_CENTS {
        return Err(price_out_of_range());
    }

    Ok(price)
}

fn invalid_price(reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: reason.to_string(),
    }
}

fn price_out_of_range() -> ValidationError {
    ValidationError::OutOfRange {
        field: "price".to_string(),
        min: 0,
        max: MAX_PRICE_CENTS,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
