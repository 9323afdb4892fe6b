//! The `stats` subcommand: catalog-wide counts.

use anyhow::Result;
use clap::Args;
use odop_lib::CachedClient;

use crate::output::{print_stats, OutputFormat};

#[derive(Args)]
pub struct StatsArgs {}

pub async fn run(_args: &StatsArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let stats = client.get_stats().await?;
    print_stats(&stats, format)?;
    Ok(())
}
