mod inspect;
mod scan;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "packwatch")]
#[command(about = "Sealed Pokémon TCG price tracker for Danish storefronts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scan every enabled shop, group offers, record prices and push deals.
    Scan {
        /// Only scan the shop with this slug.
        #[arg(long)]
        shop: Option<String>,
        /// Print the selections without touching history or notifications.
        #[arg(long)]
        dry_run: bool,
    },
    /// Show how a single listing title would be screened and grouped.
    Classify {
        title: String,
        /// Body or category text used as a second chance for series detection.
        #[arg(long)]
        extra: Option<String>,
        #[arg(long)]
        series_hint: Option<String>,
        /// Print the classification as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List configured shops.
    Shops,
    /// List known series, most specific first.
    Series,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = packwatch_core::load_app_config()?;
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    if config.env.json_logs() {
        tracing_subscriber::fmt().with_env_filter(env_filter).with_target(false).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Commands::Scan { shop, dry_run } => {
            scan::run_scan(&config, shop.as_deref(), dry_run).await?;
        }
        Commands::Classify {
            title,
            extra,
            series_hint,
            json,
        } => inspect::run_classify(&title, extra.as_deref(), series_hint.as_deref(), json)?,
        Commands::Shops => inspect::run_shops(&config)?,
        Commands::Series => inspect::run_series(),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
