use serde::{Deserialize, Serialize};

/// Catalog-wide counts from the stats endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct Stats {
    pub total_products: i64,
    pub total_states: i64,
    pub total_districts: i64,
    pub total_categories: i64,
    pub total_sectors: i64,
}

/// Distinct filterable values per dimension, as served by the filters
/// endpoint. Each list arrives sorted.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FilterOptions {
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub districts: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub sectors: Vec<String>,
    #[serde(default)]
    pub gi_statuses: Vec<String>,
}
