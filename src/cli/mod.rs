pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vintique")]
#[command(about = "Vintage lingerie stock tracker", long_about = None)]
pub struct Cli {
    /// Inventory database file (overrides the configured location)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new item to stock
    Add {
        /// Item name, e.g. "1950s Silk Peignoir"
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Image URL, data URI, or local image file to embed
        #[arg(long)]
        image: Option<String>,
        /// What you paid
        #[arg(long, default_value = "0")]
        cost: String,
        /// List price (potential revenue)
        #[arg(long, default_value = "0")]
        price: String,
    },
    /// Change details of an in-stock item
    Edit {
        /// Item id or unique id prefix
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        cost: Option<String>,
        #[arg(long)]
        price: Option<String>,
    },
    /// Mark an item as sold
    Sell {
        /// Item id or unique id prefix
        id: String,
        /// Price the item sold for
        price: String,
    },
    /// Permanently delete an item
    Delete {
        /// Item id or unique id prefix
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List the inventory
    List,
    /// Show one item in full
    Show {
        /// Item id or unique id prefix
        id: String,
    },
    /// Print the financial overview
    Summary,
    /// Write a dated JSON backup of the inventory
    Export {
        /// Target directory
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Replace the inventory with a JSON backup
    Import {
        /// Backup file to load
        path: PathBuf,
        /// Skip the overwrite confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Draft a product description from keywords
    Describe {
        #[arg(required = true, num_args = 1..)]
        keywords: Vec<String>,
    },
    /// Launch the TUI
    Tui,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "vintique", "add", "--name", "Silk Robe", "--cost", "20", "--price", "50",
        ])
        .unwrap();
        match cli.command {
            Commands::Add {
                name, cost, price, image, ..
            } => {
                assert_eq!(name, "Silk Robe");
                assert_eq!(cost, "20");
                assert_eq!(price, "50");
                assert!(image.is_none());
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_global_db_flag() {
        let cli = Cli::try_parse_from(["vintique", "list", "--db", "/tmp/stock.db"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/stock.db")));
    }

    #[test]
    fn test_describe_requires_keywords() {
        assert!(Cli::try_parse_from(["vintique", "describe"]).is_err());
        let cli = Cli::try_parse_from(["vintique", "describe", "ivory", "lace"]).unwrap();
        match cli.command {
            Commands::Describe { keywords } => assert_eq!(keywords, vec!["ivory", "lace"]),
            _ => panic!("expected describe"),
        }
    }
}
