//! # Kasse
//!
//! A single-till cash register: pick products from category tabs, take
//! cash, keep a history of orders.
//!
//! ## Module Organization
//! ```text
//! kasse/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap command definitions
//! ├── config.rs       ◄─── AppConfig from environment
//! ├── error.rs        ◄─── AppError for screens and commands
//! ├── commands.rs     ◄─── categories / products / history handlers
//! ├── register.rs     ◄─── interactive register on stdin
//! └── screens/
//!     ├── kasse.rs    ◄─── cart and checkout
//!     ├── products.rs ◄─── catalog forms
//!     └── history.rs  ◄─── past orders
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod register;
pub mod screens;

use std::io;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::Output;
use config::AppConfig;
use error::AppResult;
use kasse_db::{Database, DbConfig};
use screens::KasseScreen;

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Configuration    KASSE_* env vars, then --db                        │
/// │  2. Database path    explicit file or platform data directory           │
/// │  3. Connect          SQLite (WAL), create missing tables                │
/// │  4. Dispatch         categories | products | history | register         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> AppResult<()> {
    let config = AppConfig::from_env().with_database_path(cli.db.clone());
    let db_path = config.resolve_database_path()?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    let output = Output { json: cli.json };

    let result = match cli.command {
        Commands::Categories(command) => commands::categories(&db, command, output).await,
        Commands::Products(command) => commands::products(&db, &config, command, output).await,
        Commands::History(args) => commands::history(&db, &config, args.limit, output).await,
        Commands::Register => {
            let mut screen = KasseScreen::load(db.clone()).await?;
            register::run(&mut screen, &config, io::stdin().lock(), io::stdout().lock()).await
        }
    };

    db.close().await;
    debug!("Shut down");
    result
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kasse_db=debug` - Show every repository call
/// - Default: warnings and errors only
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
