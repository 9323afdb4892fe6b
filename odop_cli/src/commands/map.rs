//! The `map` subcommand: build the choropleth from a boundary dataset.
//!
//! Fetches the full product snapshot, aggregates it at the requested
//! level, resolves every boundary feature's name, and either writes an
//! SVG document or prints a per-feature coverage report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use odop_lib::aggregate::{
    aggregate_by_district, aggregate_by_state, district_counts, state_counts,
};
use odop_lib::boundary::{BoundarySet, DISTRICT_NAME_KEYS, STATE_NAME_KEYS};
use odop_lib::names::{load_district_aliases, load_state_aliases};
use odop_lib::{CachedClient, ChoroplethLayer, Level, Mercator, ProductQuery};

use crate::output::{print_coverage, OutputFormat};
use crate::svg::layer_to_svg;

#[derive(Args)]
pub struct MapArgs {
    /// Detail level: state or district
    #[arg(long, default_value = "state")]
    pub level: String,

    /// Path to the boundary GeoJSON document for the chosen level
    #[arg(long)]
    pub boundaries: PathBuf,

    /// Write an SVG choropleth to this path instead of printing coverage
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(long, default_value = "1000")]
    pub width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value = "700")]
    pub height: f64,

    /// Results per page while fetching
    #[arg(long, default_value = "2000")]
    pub page_size: i64,
}

pub async fn run(args: &MapArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let level = super::parse_level(&args.level)?;

    let products =
        super::fetch_all_with_progress(client, &ProductQuery::default(), args.page_size).await?;

    let raw = std::fs::read_to_string(&args.boundaries)
        .with_context(|| format!("reading boundary file {}", args.boundaries.display()))?;

    let (boundaries, counts, aliases) = match level {
        Level::State => (
            BoundarySet::from_geojson_str(&raw, STATE_NAME_KEYS)?,
            state_counts(&aggregate_by_state(&products)),
            load_state_aliases()?,
        ),
        Level::District => (
            BoundarySet::from_geojson_str(&raw, DISTRICT_NAME_KEYS)?,
            district_counts(&aggregate_by_district(&products)),
            load_district_aliases()?,
        ),
    };

    let layer = ChoroplethLayer::build(
        level,
        &boundaries,
        &counts,
        &aliases,
        Mercator::fitted(args.width, args.height),
    );

    let matched = layer.shapes.iter().filter(|s| s.region.is_some()).count();
    tracing::info!(
        "matched {} of {} boundary features against {} aggregates",
        matched,
        layer.shapes.len(),
        counts.len()
    );
    for name in layer.unmatched() {
        tracing::debug!("unmatched boundary feature: {}", name);
    }

    match &args.svg {
        Some(path) => {
            let svg = layer_to_svg(&layer, args.width, args.height);
            std::fs::write(path, svg)
                .with_context(|| format!("writing SVG to {}", path.display()))?;
            println!(
                "wrote {} ({} features, {} matched)",
                path.display(),
                layer.shapes.len(),
                matched
            );
        }
        None => {
            print_coverage(&layer, format)?;
        }
    }
    Ok(())
}
