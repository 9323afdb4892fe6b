//! Grouping the product catalog by state and by district.
//!
//! Aggregation is a single pass over the product snapshot and is pure:
//! the same input always yields the same aggregates. Keys are the raw
//! free-text names as they appear on the records; reconciliation against
//! boundary spellings happens later, in the name matcher.

use std::collections::{BTreeMap, BTreeSet};

use odop_api::types::Product;

/// All products of one state, in input order.
#[derive(Debug, Default)]
pub struct StateAggregate<'a> {
    pub products: Vec<&'a Product>,
}

impl<'a> StateAggregate<'a> {
    pub fn count(&self) -> usize {
        self.products.len()
    }

    /// Distinct categories among this state's products, sorted.
    pub fn categories(&self) -> BTreeSet<&'a str> {
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| !c.is_empty())
            .collect()
    }
}

/// All products of one district, in input order, plus the parent state.
#[derive(Debug)]
pub struct DistrictAggregate<'a> {
    /// State name of the first product that introduced this district.
    /// Later products with the same district but a different state
    /// spelling do not update it.
    pub state: String,
    pub products: Vec<&'a Product>,
}

impl<'a> DistrictAggregate<'a> {
    pub fn count(&self) -> usize {
        self.products.len()
    }

    pub fn categories(&self) -> BTreeSet<&'a str> {
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| !c.is_empty())
            .collect()
    }
}

/// Groups products by state name. Products with an empty state field are
/// skipped entirely.
pub fn aggregate_by_state(products: &[Product]) -> BTreeMap<String, StateAggregate<'_>> {
    let mut map: BTreeMap<String, StateAggregate<'_>> = BTreeMap::new();
    for product in products {
        if product.state.is_empty() {
            continue;
        }
        map.entry(product.state.clone())
            .or_default()
            .products
            .push(product);
    }
    map
}

/// Groups products by district name. Products with an empty district
/// field are skipped entirely.
pub fn aggregate_by_district(products: &[Product]) -> BTreeMap<String, DistrictAggregate<'_>> {
    let mut map: BTreeMap<String, DistrictAggregate<'_>> = BTreeMap::new();
    for product in products {
        if product.district.is_empty() {
            continue;
        }
        map.entry(product.district.clone())
            .or_insert_with(|| DistrictAggregate {
                state: product.state.clone(),
                products: Vec::new(),
            })
            .products
            .push(product);
    }
    map
}

/// Product count per state key, in key order.
pub fn state_counts(aggregates: &BTreeMap<String, StateAggregate<'_>>) -> BTreeMap<String, usize> {
    aggregates
        .iter()
        .map(|(name, agg)| (name.clone(), agg.count()))
        .collect()
}

/// Product count per district key, in key order.
pub fn district_counts(
    aggregates: &BTreeMap<String, DistrictAggregate<'_>>,
) -> BTreeMap<String, usize> {
    aggregates
        .iter()
        .map(|(name, agg)| (name.clone(), agg.count()))
        .collect()
}

/// Product counts per distinct value of one dimension, for filter
/// dropdown badges. Empty values are skipped.
pub fn dimension_counts<F>(products: &[Product], dimension: F) -> BTreeMap<String, usize>
where
    F: Fn(&Product) -> &str,
{
    let mut map: BTreeMap<String, usize> = BTreeMap::new();
    for product in products {
        let value = dimension(product);
        if value.is_empty() {
            continue;
        }
        *map.entry(value.to_string()).or_default() += 1;
    }
    map
}

/// The most productive states, sorted by product count descending.
pub fn top_states<'a>(
    aggregates: &'a BTreeMap<String, StateAggregate<'_>>,
    limit: usize,
) -> Vec<(&'a str, usize)> {
    let mut sorted: Vec<(&str, usize)> = aggregates
        .iter()
        .map(|(name, agg)| (name.as_str(), agg.count()))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted.truncate(limit);
    sorted
}
