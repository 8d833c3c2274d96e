use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vintique::app::AppContext;
use vintique::cli::commands::{self, EditArgs};
use vintique::cli::{Cli, Commands};
use vintique::config::Config;
use vintique::domain::{coerce_amount, ItemDraft};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let mut ctx = AppContext::new(config, cli.db)?;

    match cli.command {
        Commands::Add {
            name,
            description,
            image,
            cost,
            price,
        } => {
            let draft = ItemDraft {
                name,
                description,
                image_url: String::new(),
                cost: coerce_amount(&cost),
                potential_revenue: coerce_amount(&price),
            };
            commands::add_item(&mut ctx, draft, image.as_deref())?;
        }
        Commands::Edit {
            id,
            name,
            description,
            image,
            cost,
            price,
        } => {
            let args = EditArgs {
                name,
                description,
                image: image.as_deref(),
                cost: cost.as_deref(),
                price: price.as_deref(),
            };
            commands::edit_item(&mut ctx, &id, args)?;
        }
        Commands::Sell { id, price } => {
            commands::sell_item(&mut ctx, &id, &price)?;
        }
        Commands::Delete { id, yes } => {
            commands::delete_item(&mut ctx, &id, yes)?;
        }
        Commands::List => {
            commands::list_items(&ctx)?;
        }
        Commands::Show { id } => {
            commands::show_item(&ctx, &id)?;
        }
        Commands::Summary => {
            commands::print_summary(&ctx)?;
        }
        Commands::Export { dir } => {
            commands::export_backup(&ctx, dir.as_deref())?;
        }
        Commands::Import { path, yes } => {
            commands::import_backup(&mut ctx, &path, yes)?;
        }
        Commands::Describe { keywords } => {
            commands::describe(&ctx, &keywords).await?;
        }
        Commands::Tui => {
            vintique::tui::run(ctx).await?;
        }
    }

    Ok(())
}
