mod collect;
mod sink;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "alko-cli")]
#[command(about = "alkoteka.com catalog export")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect every city and write them to the cities file
    Cities {
        /// Write here instead of the configured cities file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Collect the category list of every city in the cities file
    Categories {
        /// Write here instead of `<output dir>/categories.json`
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Collect and normalize the products of the configured catalog sections
    Products {
        /// Catalog URL to collect; repeat for several. Overrides the categories file
        #[arg(long = "category", value_name = "URL")]
        categories: Vec<String>,

        /// Write here instead of `<output dir>/products.json`
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the category slugs that would be collected and exit
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = alko_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(
        env = %config.env,
        api = %config.api_base_url,
        city = %config.city_uuid,
        "configuration loaded"
    );

    match cli.command {
        Commands::Cities { output } => {
            collect::run_collect_cities(&config, output.as_deref()).await?;
        }
        Commands::Categories { output } => {
            collect::run_collect_categories(&config, output.as_deref()).await?;
        }
        Commands::Products {
            categories,
            output,
            dry_run,
        } => {
            collect::run_collect_products(&config, &categories, output.as_deref(), dry_run)
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
