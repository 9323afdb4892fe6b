//! The `products` subcommand: lists catalog products with filters and search.

use anyhow::{bail, Result};
use clap::Args;
use odop_lib::types::Product;
use odop_lib::{CachedClient, ProductQuery, ProductSortBy, Query, SortDirection};

use crate::output::{print_products, OutputFormat};

/// Arguments for the `products` subcommand.
///
/// Each dimension filter accepts a single value, matching the API's
/// exact-value filtering. Search matches free text across name,
/// description, district, and state server-side.
#[derive(Args)]
pub struct ProductsArgs {
    /// Filter by state name (exact)
    #[arg(long)]
    pub state: Option<String>,

    /// Filter by district name (exact)
    #[arg(long)]
    pub district: Option<String>,

    /// Filter by category (exact)
    #[arg(long)]
    pub category: Option<String>,

    /// Filter by sector (exact)
    #[arg(long)]
    pub sector: Option<String>,

    /// Filter by GI status (exact)
    #[arg(long)]
    pub gi_status: Option<String>,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "2000")]
    pub page_size: i64,

    /// Sort field: product, state, district, created_at
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long)]
    pub desc: bool,

    /// Fetch every page instead of one
    #[arg(long)]
    pub all: bool,
}

fn build_query(args: &ProductsArgs) -> Result<ProductQuery> {
    let mut query = ProductQuery::default()
        .with_page(args.page)
        .with_page_size(args.page_size);

    if let Some(state) = &args.state {
        query = query.with_state(state);
    }
    if let Some(district) = &args.district {
        query = query.with_district(district);
    }
    if let Some(category) = &args.category {
        query = query.with_category(category);
    }
    if let Some(sector) = &args.sector {
        query = query.with_sector(sector);
    }
    if let Some(gi_status) = &args.gi_status {
        query = query.with_gi_status(gi_status);
    }
    if let Some(search) = &args.search {
        query = query.with_search(search);
    }
    if let Some(sort_by) = &args.sort_by {
        let Ok(sort_by) = sort_by.parse::<ProductSortBy>() else {
            bail!(
                "invalid sort field '{}': expected product, state, district, or created_at",
                sort_by
            );
        };
        query = query.with_sort_by(sort_by);
    }
    if args.desc {
        query = query.with_sort_direction(SortDirection::Desc);
    }
    Ok(query)
}

pub async fn run(
    args: &ProductsArgs,
    client: &CachedClient,
    format: &OutputFormat,
) -> Result<()> {
    let query = build_query(args)?;

    let products: Vec<Product> = if args.all {
        super::fetch_all_with_progress(client, &query, args.page_size).await?
    } else {
        client.get_products(&query).await?.into_items()
    };

    let refs: Vec<&Product> = products.iter().collect();
    print_products(&refs, format)?;
    Ok(())
}
