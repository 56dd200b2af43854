//! # Command Line
//!
//! ```text
//! kasse [--db PATH] [--json] <COMMAND>
//!
//!   categories list | add NAME | rename ID NAME | delete ID [--yes]
//!   products   list [--category ID] | add NAME PRICE [--category ID]
//!              edit ID NAME PRICE [--category ID] | delete ID [--yes]
//!   history    [--limit N]
//!   register   interactive till on stdin
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::screens::history::DEFAULT_LIMIT;

#[derive(Debug, Parser)]
#[command(name = "kasse", about = "Cash register for a single till", version)]
pub struct Cli {
    #[arg(long, global = true, help = "Database file (overrides KASSE_DB_PATH)")]
    pub db: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage categories
    #[command(subcommand)]
    Categories(CategoryCommands),

    /// Manage products
    #[command(subcommand)]
    Products(ProductCommands),

    /// Show past orders
    History(HistoryArgs),

    /// Run the interactive register
    Register,
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommands {
    List,
    Add {
        name: String,
    },
    Rename {
        id: i64,
        name: String,
    },
    /// Delete a category and all of its products
    Delete(DeleteArgs),
}

#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    List {
        #[arg(long, help = "Only products of this category")]
        category: Option<i64>,
    },
    Add {
        name: String,
        #[arg(help = "Price such as 2.50 or 2,50")]
        price: String,
        #[arg(long, help = "Category id; defaults to the first category")]
        category: Option<i64>,
    },
    Edit {
        id: i64,
        name: String,
        price: String,
        #[arg(long, help = "Move to this category; defaults to the current one")]
        category: Option<i64>,
    },
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: i64,
    #[arg(long, short = 'y', action = ArgAction::SetTrue, help = "Skip the confirmation prompt")]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[arg(long, default_value_t = DEFAULT_LIMIT, help = "Most recent orders to show")]
    pub limit: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_product_add_with_global_flags() {
        let cli = Cli::try_parse_from([
            "kasse", "products", "add", "Brezel", "1,20", "--category", "2", "--db", "/tmp/k.db",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/k.db")));
        match cli.command {
            Commands::Products(ProductCommands::Add {
                name,
                price,
                category,
            }) => {
                assert_eq!(name, "Brezel");
                assert_eq!(price, "1,20");
                assert_eq!(category, Some(2));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_delete_and_history_defaults() {
        let cli = Cli::try_parse_from(["kasse", "categories", "delete", "3"]).unwrap();
        match cli.command {
            Commands::Categories(CategoryCommands::Delete(args)) => {
                assert_eq!(args.id, 3);
                assert!(!args.yes);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["kasse", "history"]).unwrap();
        match cli.command {
            Commands::History(args) => assert_eq!(args.limit, DEFAULT_LIMIT),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
