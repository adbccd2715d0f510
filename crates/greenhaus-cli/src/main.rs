mod categories;
mod products;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use products::ProductsArgs;

#[derive(Debug, Parser)]
#[command(name = "greenhaus-cli")]
#[command(about = "Greenhaus storefront catalog tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Aggregate every configured product source, then filter and sort
    Products(ProductsArgs),
    /// Print the category catalog used to reconcile source categories
    Categories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = greenhaus_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, "configuration loaded");

    let cli = Cli::parse();
    match cli.command {
        Commands::Products(args) => products::run_products(&config, &args).await?,
        Commands::Categories => categories::run_categories(&config)?,
    }

    Ok(())
}
