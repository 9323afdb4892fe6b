mod commands;
mod output;
mod svg;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use odop_lib::cache::TtlCache;
use odop_lib::CachedClient;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "odop")]
#[command(about = "Browse the One District One Product catalog from the terminal")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API base URL. Defaults to $ODOP_API_URL, then the local backend.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products with optional filters and search
    Products(commands::products::ProductsArgs),
    /// Show catalog-wide statistics
    Stats(commands::stats::StatsArgs),
    /// List the available filter options per dimension
    Filters(commands::filters::FiltersArgs),
    /// Aggregate products by state or district
    Regions(commands::regions::RegionsArgs),
    /// Build the choropleth map from a boundary dataset
    Map(commands::map::MapArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("odop=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let base_url = cli
        .api_url
        .or_else(|| std::env::var("ODOP_API_URL").ok())
        .unwrap_or_else(|| "http://127.0.0.1:8000/api".to_string());

    let cache = TtlCache::new(Duration::from_secs(300));
    let client = CachedClient::with_base_url(&base_url, cache);

    match &cli.command {
        Commands::Products(args) => commands::products::run(args, &client, &format).await?,
        Commands::Stats(args) => commands::stats::run(args, &client, &format).await?,
        Commands::Filters(args) => commands::filters::run(args, &client, &format).await?,
        Commands::Regions(args) => commands::regions::run(args, &client, &format).await?,
        Commands::Map(args) => commands::map::run(args, &client, &format).await?,
    }

    Ok(())
}
