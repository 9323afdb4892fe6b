use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;
use odop_lib::aggregate::{DistrictAggregate, StateAggregate};
use odop_lib::types::{FilterOptions, Product, Stats};
use odop_lib::ChoroplethLayer;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct ProductRow {
    #[tabled(rename = "Product")]
    #[serde(rename = "Product")]
    name: String,
    #[tabled(rename = "District")]
    #[serde(rename = "District")]
    district: String,
    #[tabled(rename = "State")]
    #[serde(rename = "State")]
    state: String,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    category: String,
    #[tabled(rename = "Sector")]
    #[serde(rename = "Sector")]
    sector: String,
    #[tabled(rename = "GI")]
    #[serde(rename = "GI")]
    gi: String,
}

#[derive(Tabled, Serialize)]
struct StateRow {
    #[tabled(rename = "State")]
    #[serde(rename = "State")]
    state: String,
    #[tabled(rename = "Products")]
    #[serde(rename = "Products")]
    products: usize,
    #[tabled(rename = "Categories")]
    #[serde(rename = "Categories")]
    categories: usize,
}

#[derive(Tabled, Serialize)]
struct DistrictRow {
    #[tabled(rename = "District")]
    #[serde(rename = "District")]
    district: String,
    #[tabled(rename = "State")]
    #[serde(rename = "State")]
    state: String,
    #[tabled(rename = "Products")]
    #[serde(rename = "Products")]
    products: usize,
}

#[derive(Tabled, Serialize)]
struct CoverageRow {
    #[tabled(rename = "Boundary")]
    #[serde(rename = "Boundary")]
    boundary: String,
    #[tabled(rename = "Region")]
    #[serde(rename = "Region")]
    region: String,
    #[tabled(rename = "Products")]
    #[serde(rename = "Products")]
    products: usize,
    #[tabled(rename = "Bucket")]
    #[serde(rename = "Bucket")]
    bucket: String,
}

#[derive(Tabled, Serialize)]
struct StatsRow {
    #[tabled(rename = "Products")]
    #[serde(rename = "Products")]
    products: i64,
    #[tabled(rename = "States")]
    #[serde(rename = "States")]
    states: i64,
    #[tabled(rename = "Districts")]
    #[serde(rename = "Districts")]
    districts: i64,
    #[tabled(rename = "Categories")]
    #[serde(rename = "Categories")]
    categories: i64,
    #[tabled(rename = "Sectors")]
    #[serde(rename = "Sectors")]
    sectors: i64,
}

// -- Row builders --

fn build_product_rows(products: &[&Product]) -> Vec<ProductRow> {
    products
        .iter()
        .map(|p| ProductRow {
            name: p.name.clone(),
            district: p.district.clone(),
            state: p.state.clone(),
            category: p.category.clone(),
            sector: p.sector.clone(),
            gi: if p.has_gi_tag() { "yes" } else { "" }.to_string(),
        })
        .collect()
}

fn build_state_rows(aggregates: &BTreeMap<String, StateAggregate<'_>>) -> Vec<StateRow> {
    aggregates
        .iter()
        .map(|(name, agg)| StateRow {
            state: name.clone(),
            products: agg.count(),
            categories: agg.categories().len(),
        })
        .collect()
}

fn build_district_rows(aggregates: &BTreeMap<String, DistrictAggregate<'_>>) -> Vec<DistrictRow> {
    aggregates
        .iter()
        .map(|(name, agg)| DistrictRow {
            district: name.clone(),
            state: agg.state.clone(),
            products: agg.count(),
        })
        .collect()
}

fn build_coverage_rows(layer: &ChoroplethLayer) -> Vec<CoverageRow> {
    layer
        .shapes
        .iter()
        .map(|shape| CoverageRow {
            boundary: shape.boundary_name.clone(),
            region: shape.region.clone().unwrap_or_default(),
            products: shape.count,
            bucket: shape.bucket.label().to_string(),
        })
        .collect()
}

fn build_stats_rows(stats: &Stats) -> Vec<StatsRow> {
    vec![StatsRow {
        products: stats.total_products,
        states: stats.total_states,
        districts: stats.total_districts,
        categories: stats.total_categories,
        sectors: stats.total_sectors,
    }]
}

// -- Generic printers over one row shape --

fn print_rows<T: Tabled + Serialize>(rows: Vec<T>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

pub fn print_products(products: &[&Product], format: &OutputFormat) -> Result<()> {
    match format {
        // JSON output carries the full records, not the table projection.
        OutputFormat::Json => {
            print_json(&products);
            Ok(())
        }
        _ => print_rows(build_product_rows(products), format),
    }
}

pub fn print_states(
    aggregates: &BTreeMap<String, StateAggregate<'_>>,
    format: &OutputFormat,
) -> Result<()> {
    print_rows(build_state_rows(aggregates), format)
}

pub fn print_districts(
    aggregates: &BTreeMap<String, DistrictAggregate<'_>>,
    format: &OutputFormat,
) -> Result<()> {
    print_rows(build_district_rows(aggregates), format)
}

pub fn print_coverage(layer: &ChoroplethLayer, format: &OutputFormat) -> Result<()> {
    print_rows(build_coverage_rows(layer), format)
}

pub fn print_stats(stats: &Stats, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(stats);
            Ok(())
        }
        _ => print_rows(build_stats_rows(stats), format),
    }
}

pub fn print_filter_options(options: &FilterOptions, format: &OutputFormat) -> Result<()> {
    if let OutputFormat::Json = format {
        print_json(options);
        return Ok(());
    }
    let sections: [(&str, &Vec<String>); 5] = [
        ("States", &options.states),
        ("Districts", &options.districts),
        ("Categories", &options.categories),
        ("Sectors", &options.sectors),
        ("GI statuses", &options.gi_statuses),
    ];
    for (label, values) in sections {
        println!("{} ({})", label, values.len());
        for value in values {
            println!("  {}", value);
        }
    }
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
