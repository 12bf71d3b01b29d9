use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gleaner::app::AppContext;
use gleaner::cli::{commands, Cli, Commands};
use gleaner::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::List { category, json } => {
            commands::list_entries(&ctx, category.as_deref(), json).await?;
        }
        Commands::Categories => {
            commands::list_categories(&ctx).await?;
        }
        Commands::Show { id } => {
            commands::show_entry(&ctx, &id).await?;
        }
        Commands::Simplify { url } => {
            commands::simplify_url(&ctx, &url).await?;
        }
        Commands::Digest { limit, concurrency } => {
            commands::digest(&ctx, limit, concurrency).await?;
        }
        Commands::Open { id } => {
            commands::open_entry(&ctx, &id).await?;
        }
    }

    Ok(())
}
