//! The `regions` subcommand: aggregate the catalog by state or district.

use anyhow::Result;
use clap::Args;
use odop_lib::aggregate::{aggregate_by_district, aggregate_by_state, top_states};
use odop_lib::{CachedClient, Level, ProductQuery};

use crate::output::{print_districts, print_json, print_states, OutputFormat};

#[derive(Args)]
pub struct RegionsArgs {
    /// Aggregation level: state or district
    #[arg(long, default_value = "state")]
    pub level: String,

    /// Show only the N most productive states (state level only)
    #[arg(long)]
    pub top: Option<usize>,

    /// Results per page while fetching
    #[arg(long, default_value = "2000")]
    pub page_size: i64,
}

pub async fn run(args: &RegionsArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let level = super::parse_level(&args.level)?;
    let products =
        super::fetch_all_with_progress(client, &ProductQuery::default(), args.page_size).await?;

    match level {
        Level::State => {
            let aggregates = aggregate_by_state(&products);
            if let Some(limit) = args.top {
                let top = top_states(&aggregates, limit);
                match format {
                    OutputFormat::Json => print_json(&top),
                    _ => {
                        for (state, count) in top {
                            println!("{:5}  {}", count, state);
                        }
                    }
                }
                return Ok(());
            }
            print_states(&aggregates, format)?;
        }
        Level::District => {
            let aggregates = aggregate_by_district(&products);
            print_districts(&aggregates, format)?;
        }
    }
    Ok(())
}
