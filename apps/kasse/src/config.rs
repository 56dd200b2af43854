//! # App Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line (`--db`)
//! 2. Environment variables (`KASSE_*`)
//! 3. Defaults (this file)

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use kasse_core::Money;

/// File name of the database inside the platform data directory.
pub const DATABASE_FILE: &str = "kasse.db";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    /// Explicit database file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Store name shown in headers
    pub store_name: String,

    /// Currency symbol prefixed to amounts
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: None,
            store_name: "Kasse".to_string(),
            currency_symbol: "€".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// ## Environment Variables
    /// - `KASSE_DB_PATH`: Database file
    /// - `KASSE_STORE_NAME`: Store name
    /// - `KASSE_CURRENCY_SYMBOL`: Currency symbol
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = AppConfig::default();

        if let Some(path) = lookup("KASSE_DB_PATH").filter(|p| !p.trim().is_empty()) {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(store_name) = lookup("KASSE_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(symbol) = lookup("KASSE_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Overrides the database path (from `--db`).
    pub fn with_database_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.database_path = path;
        }
        self
    }

    /// Resolves the database file, creating the data directory if needed.
    ///
    /// ## Platform-Specific Default
    /// - **macOS**: `~/Library/Application Support/com.kasse.kasse/kasse.db`
    /// - **Windows**: `%APPDATA%\kasse\kasse\data\kasse.db`
    /// - **Linux**: `~/.local/share/kasse/kasse.db`
    pub fn resolve_database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let dirs = ProjectDirs::from("com", "kasse", "kasse")
            .ok_or_else(|| AppError::internal("Could not determine app data directory"))?;

        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DATABASE_FILE))
    }

    /// Formats an amount with the currency symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(600)), "€6.00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        if amount.is_negative() {
            format!("-{}{}", self.currency_symbol, Money::from_cents(-amount.cents()))
        } else {
            format!("{}{}", self.currency_symbol, amount)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.store_name, "Kasse");
        assert_eq!(config.currency_symbol, "€");
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("KASSE_DB_PATH", "/tmp/till.db"),
            ("KASSE_STORE_NAME", "Café Mitte"),
            ("KASSE_CURRENCY_SYMBOL", "CHF "),
        ]));

        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/till.db")));
        assert_eq!(config.store_name, "Café Mitte");
        assert_eq!(config.format_currency(Money::from_cents(250)), "CHF 2.50");
    }

    #[test]
    fn test_cli_path_wins_over_env() {
        let config = AppConfig::from_lookup(lookup(&[("KASSE_DB_PATH", "/tmp/env.db")]))
            .with_database_path(Some(PathBuf::from("/tmp/cli.db")));
        assert_eq!(
            config.resolve_database_path().unwrap(),
            PathBuf::from("/tmp/cli.db")
        );

        let config = AppConfig::from_lookup(lookup(&[("KASSE_DB_PATH", "/tmp/env.db")]))
            .with_database_path(None);
        assert_eq!(
            config.resolve_database_path().unwrap(),
            PathBuf::from("/tmp/env.db")
        );
    }

    #[test]
    fn test_format_currency() {
        let config = AppConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(600)), "€6.00");
        assert_eq!(config.format_currency(Money::from_cents(5)), "€0.05");
        assert_eq!(config.format_currency(Money::zero()), "€0.00");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-€12.34");
    }
}
