//! The `filters` subcommand: available filter values per dimension.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Args;
use odop_lib::aggregate::dimension_counts;
use odop_lib::{CachedClient, ProductQuery};

use crate::output::{print_filter_options, print_json, OutputFormat};

#[derive(Args)]
pub struct FiltersArgs {
    /// Also fetch the catalog and show a product count per value
    #[arg(long)]
    pub counts: bool,

    /// Results per page while fetching (with --counts)
    #[arg(long, default_value = "2000")]
    pub page_size: i64,
}

pub async fn run(args: &FiltersArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    if !args.counts {
        let options = client.get_filter_options().await?;
        print_filter_options(&options, format)?;
        return Ok(());
    }

    let products =
        super::fetch_all_with_progress(client, &ProductQuery::default(), args.page_size).await?;
    let sections: [(&str, BTreeMap<String, usize>); 4] = [
        ("states", dimension_counts(&products, |p| p.state.as_str())),
        ("districts", dimension_counts(&products, |p| p.district.as_str())),
        (
            "categories",
            dimension_counts(&products, |p| p.category.as_str()),
        ),
        ("sectors", dimension_counts(&products, |p| p.sector.as_str())),
    ];

    if let OutputFormat::Json = format {
        let object: BTreeMap<&str, &BTreeMap<String, usize>> =
            sections.iter().map(|(label, counts)| (*label, counts)).collect();
        print_json(&object);
        return Ok(());
    }

    for (label, counts) in &sections {
        println!("{} ({})", label, counts.len());
        for (value, count) in counts {
            println!("  {:5}  {}", count, value);
        }
    }
    Ok(())
}
