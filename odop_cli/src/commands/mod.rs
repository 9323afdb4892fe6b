pub mod filters;
pub mod map;
pub mod products;
pub mod regions;
pub mod stats;

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use odop_lib::types::Product;
use odop_lib::{CachedClient, Level, ProductQuery};

pub(crate) fn parse_level(raw: &str) -> Result<Level> {
    match raw {
        "state" => Ok(Level::State),
        "district" => Ok(Level::District),
        _ => bail!("invalid level '{}': expected 'state' or 'district'", raw),
    }
}

/// Fetches every page of products with a progress bar on stderr.
pub(crate) async fn fetch_all_with_progress(
    client: &CachedClient,
    query: &ProductQuery,
    page_size: i64,
) -> Result<Vec<Product>> {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{spinner} fetching products {pos}/{len}")
            .expect("valid progress template"),
    );

    let products = client
        .fetch_all_products(query, page_size, |fetched, total| {
            bar.set_length(total.max(0) as u64);
            bar.set_position(fetched as u64);
        })
        .await?;

    bar.finish_and_clear();
    Ok(products)
}
