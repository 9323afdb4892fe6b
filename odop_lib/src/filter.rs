//! Filter and selection state for the product list.
//!
//! The state is an explicit value updated through [`FilterState::apply`];
//! there is no hidden mutable state. Active dimensions combine with
//! logical AND; values within one dimension combine with logical OR.

use odop_api::types::Product;

/// Search input is truncated to this many characters before matching,
/// bounding the per-product scan cost.
pub const MAX_SEARCH_LEN: usize = 100;

/// The active filter selections. Empty everywhere means idle: every
/// product is visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub states: Vec<String>,
    pub categories: Vec<String>,
    pub sectors: Vec<String>,
    pub search: String,
}

/// A single user interaction with the filter UI or the map.
#[derive(Debug, Clone)]
pub enum FilterAction {
    /// Check or uncheck one state in the filter dropdown.
    ToggleState(String),
    ToggleCategory(String),
    ToggleSector(String),
    /// Map activation: replace the state selection with a singleton.
    SelectStateOnly(String),
    SetSearch(String),
    ClearStates,
    ClearCategories,
    ClearSectors,
    ClearSearch,
    ClearAll,
}

impl FilterState {
    /// True when no filter dimension is active.
    pub fn is_idle(&self) -> bool {
        self.states.is_empty()
            && self.categories.is_empty()
            && self.sectors.is_empty()
            && self.search.is_empty()
    }

    /// Applies one action, returning the next state.
    pub fn apply(&self, action: FilterAction) -> FilterState {
        let mut next = self.clone();
        match action {
            FilterAction::ToggleState(value) => toggle(&mut next.states, value),
            FilterAction::ToggleCategory(value) => toggle(&mut next.categories, value),
            FilterAction::ToggleSector(value) => toggle(&mut next.sectors, value),
            FilterAction::SelectStateOnly(value) => next.states = vec![value],
            FilterAction::SetSearch(value) => next.search = value,
            FilterAction::ClearStates => next.states.clear(),
            FilterAction::ClearCategories => next.categories.clear(),
            FilterAction::ClearSectors => next.sectors.clear(),
            FilterAction::ClearSearch => next.search.clear(),
            FilterAction::ClearAll => next = FilterState::default(),
        }
        next
    }

    /// The visible product list under the current filters.
    ///
    /// Dimensions AND together; values within a dimension OR together.
    /// The search term matches case-insensitively as a substring of the
    /// concatenated name, description, state, district, and category.
    pub fn filter_products<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        if self.is_idle() {
            return products.iter().collect();
        }

        let needle = sanitized_search(&self.search);

        products
            .iter()
            .filter(|p| self.states.is_empty() || self.states.contains(&p.state))
            .filter(|p| self.categories.is_empty() || self.categories.contains(&p.category))
            .filter(|p| self.sectors.is_empty() || self.sectors.contains(&p.sector))
            .filter(|p| match &needle {
                Some(needle) => searchable_text(p).contains(needle.as_str()),
                None => true,
            })
            .collect()
    }
}

fn toggle(values: &mut Vec<String>, value: String) {
    match values.iter().position(|v| *v == value) {
        Some(index) => {
            values.remove(index);
        }
        None => values.push(value),
    }
}

/// Trims, truncates, and lower-cases the search input. Returns `None`
/// when nothing searchable remains.
fn sanitized_search(raw: &str) -> Option<String> {
    let trimmed: String = raw.trim().chars().take(MAX_SEARCH_LEN).collect();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn searchable_text(product: &Product) -> String {
    format!(
        "{} {} {} {} {}",
        product.name, product.description, product.state, product.district, product.category
    )
    .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(
        id: i64,
        name: &str,
        state: &str,
        district: &str,
        category: &str,
        sector: &str,
    ) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "product": name,
            "state": state,
            "district": district,
            "category": category,
            "sector": sector,
            "description": format!("{} from {}", name, district),
        }))
        .unwrap()
    }

    fn sample() -> Vec<Product> {
        vec![
            product(1, "Silk Saree", "A", "D1", "X", "Textiles"),
            product(2, "Clay Pot", "A", "D2", "Y", "Handicrafts"),
            product(3, "Brass Lamp", "B", "D3", "X", "Handicrafts"),
            product(4, "Wool Shawl", "B", "D4", "Y", "Textiles"),
        ]
    }

    #[test]
    fn idle_state_shows_everything() {
        let filters = FilterState::default();
        assert!(filters.is_idle());
        assert_eq!(filters.filter_products(&sample()).len(), 4);
    }

    #[test]
    fn dimensions_combine_with_and() {
        let products = sample();
        let filters = FilterState::default()
            .apply(FilterAction::ToggleState("A".to_string()))
            .apply(FilterAction::ToggleCategory("Y".to_string()));

        let visible = filters.filter_products(&products);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);
    }

    #[test]
    fn values_within_dimension_combine_with_or() {
        let products = sample();
        let filters = FilterState::default()
            .apply(FilterAction::ToggleState("A".to_string()))
            .apply(FilterAction::ToggleState("B".to_string()));

        assert_eq!(filters.filter_products(&products).len(), 4);
    }

    #[test]
    fn toggle_removes_on_second_application() {
        let filters = FilterState::default()
            .apply(FilterAction::ToggleState("A".to_string()))
            .apply(FilterAction::ToggleState("A".to_string()));
        assert!(filters.is_idle());
    }

    #[test]
    fn map_activation_replaces_state_selection() {
        let filters = FilterState::default()
            .apply(FilterAction::ToggleState("A".to_string()))
            .apply(FilterAction::ToggleState("B".to_string()))
            .apply(FilterAction::SelectStateOnly("B".to_string()));
        assert_eq!(filters.states, vec!["B".to_string()]);
    }

    #[test]
    fn search_matches_case_insensitive_substring() {
        let products = sample();
        let filters =
            FilterState::default().apply(FilterAction::SetSearch("BRASS".to_string()));
        let visible = filters.filter_products(&products);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 3);
    }

    #[test]
    fn search_spans_description_and_location() {
        let products = sample();
        // Matches via the generated description "Wool Shawl from D4".
        let filters = FilterState::default().apply(FilterAction::SetSearch("from d4".to_string()));
        let visible = filters.filter_products(&products);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 4);
    }

    #[test]
    fn search_is_truncated_to_bound() {
        let products = sample();
        let long = format!("silk{}", "x".repeat(400));
        let filters = FilterState::default().apply(FilterAction::SetSearch(long));
        // The truncated needle still exceeds any searchable text, so no hits;
        // the point is that it does not blow up and stays bounded.
        assert!(filters.filter_products(&products).is_empty());

        let padded = format!("  saree{}", " ".repeat(200));
        let filters = FilterState::default().apply(FilterAction::SetSearch(padded));
        assert_eq!(filters.filter_products(&products).len(), 1);
    }

    #[test]
    fn whitespace_only_search_is_ignored() {
        let products = sample();
        let filters = FilterState::default().apply(FilterAction::SetSearch("   ".to_string()));
        assert_eq!(filters.filter_products(&products).len(), 4);
    }

    #[test]
    fn clear_actions_return_to_idle() {
        let filters = FilterState::default()
            .apply(FilterAction::ToggleState("A".to_string()))
            .apply(FilterAction::ToggleSector("Textiles".to_string()))
            .apply(FilterAction::SetSearch("pot".to_string()));
        assert!(!filters.is_idle());

        let filters = filters
            .apply(FilterAction::ClearStates)
            .apply(FilterAction::ClearSectors)
            .apply(FilterAction::ClearSearch);
        assert!(filters.is_idle());

        let filters = FilterState::default()
            .apply(FilterAction::ToggleCategory("X".to_string()))
            .apply(FilterAction::ClearAll);
        assert!(filters.is_idle());
    }

    #[test]
    fn apply_does_not_mutate_the_source_state() {
        let original = FilterState::default();
        let _ = original.apply(FilterAction::ToggleState("A".to_string()));
        assert!(original.is_idle());
    }
}
