//! Application session state, modeled as a reducer over an explicit
//! state value.
//!
//! Everything the UI layer needs to render lives in [`AppState`]; every
//! interaction and load completion is an [`AppEvent`] fed through
//! [`update`]. Derived data (aggregates, the visible list) is recomputed
//! from the snapshot rather than incrementally mutated, so there is
//! nothing to keep consistent across events.

use odop_api::types::{Product, Stats};

use crate::boundary::BoundarySet;
use crate::choropleth::Level;
use crate::filter::{FilterAction, FilterState};

/// Session theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Lifecycle of an asynchronously fetched resource.
#[derive(Debug, Clone, Default)]
pub enum LoadState<T> {
    #[default]
    NotLoaded,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// The product snapshot and its stats, loaded together at startup.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub stats: Option<Stats>,
}

/// Full session state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub catalog: LoadState<CatalogSnapshot>,
    pub filters: FilterState,
    pub selected_product: Option<Product>,
    pub theme: Theme,
    pub dropdown_open: bool,
    /// District boundaries are fetched lazily, only when the user asks
    /// for district detail.
    pub district_boundaries: LoadState<BoundarySet>,
}

/// Everything that can happen to the session.
#[derive(Debug, Clone)]
pub enum AppEvent {
    LoadStarted,
    LoadSucceeded {
        products: Vec<Product>,
        stats: Option<Stats>,
    },
    LoadFailed(String),
    /// User-initiated reload after a failure. Clears all session state.
    Retry,
    Filter(FilterAction),
    /// A region was activated on the map; narrows the state filter to it.
    RegionActivated(String),
    ProductActivated(Product),
    ProductDismissed,
    DistrictLayerRequested,
    DistrictLayerLoaded(BoundarySet),
    DistrictLayerFailed(String),
    ThemeToggled,
    DropdownToggled,
}

/// Applies one event, returning the next state.
pub fn update(state: AppState, event: AppEvent) -> AppState {
    let mut next = state;
    match event {
        AppEvent::LoadStarted => {
            next.catalog = LoadState::Loading;
        }
        AppEvent::LoadSucceeded { products, stats } => {
            next.catalog = LoadState::Loaded(CatalogSnapshot { products, stats });
        }
        AppEvent::LoadFailed(message) => {
            tracing::error!("catalog load failed: {}", message);
            next.catalog = LoadState::Failed(message);
        }
        AppEvent::Retry => {
            // A retry is a full reload: everything resets.
            next = AppState {
                theme: next.theme,
                catalog: LoadState::Loading,
                ..AppState::default()
            };
        }
        AppEvent::Filter(action) => {
            next.filters = next.filters.apply(action);
        }
        AppEvent::RegionActivated(region) => {
            next.filters = next.filters.apply(FilterAction::SelectStateOnly(region));
        }
        AppEvent::ProductActivated(product) => {
            next.selected_product = Some(product);
        }
        AppEvent::ProductDismissed => {
            next.selected_product = None;
        }
        AppEvent::DistrictLayerRequested => {
            // Requesting while already loading or loaded is a no-op.
            // In-flight duplicates are not deduplicated here; a second
            // resolution simply overwrites the first with equal data.
            if matches!(next.district_boundaries, LoadState::NotLoaded | LoadState::Failed(_)) {
                next.district_boundaries = LoadState::Loading;
            }
        }
        AppEvent::DistrictLayerLoaded(boundaries) => {
            next.district_boundaries = LoadState::Loaded(boundaries);
        }
        AppEvent::DistrictLayerFailed(message) => {
            tracing::warn!("district boundary load failed: {}", message);
            next.district_boundaries = LoadState::Failed(message);
        }
        AppEvent::ThemeToggled => {
            next.theme = match next.theme {
                Theme::Light => Theme::Dark,
                Theme::Dark => Theme::Light,
            };
        }
        AppEvent::DropdownToggled => {
            next.dropdown_open = !next.dropdown_open;
        }
    }
    next
}

impl AppState {
    /// The map detail level safe to render right now: district only once
    /// its boundary fetch has resolved, state otherwise.
    pub fn map_level(&self) -> Level {
        match self.district_boundaries {
            LoadState::Loaded(_) => Level::District,
            _ => Level::State,
        }
    }

    /// The product list under the active filters. Empty until the
    /// catalog has loaded.
    pub fn visible_products(&self) -> Vec<&Product> {
        match self.catalog.loaded() {
            Some(snapshot) => self.filters.filter_products(&snapshot.products),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, state: &str) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "product": name,
            "state": state,
            "district": format!("{} District", state),
        }))
        .unwrap()
    }

    fn loaded_state() -> AppState {
        let products = vec![
            product(1, "Saree", "A"),
            product(2, "Pot", "A"),
            product(3, "Lamp", "B"),
        ];
        update(
            update(AppState::default(), AppEvent::LoadStarted),
            AppEvent::LoadSucceeded {
                products,
                stats: None,
            },
        )
    }

    #[test]
    fn load_lifecycle() {
        let state = AppState::default();
        assert!(state.visible_products().is_empty());

        let state = update(state, AppEvent::LoadStarted);
        assert!(state.catalog.is_loading());

        let state = update(
            state,
            AppEvent::LoadSucceeded {
                products: vec![product(1, "Saree", "A")],
                stats: None,
            },
        );
        assert_eq!(state.visible_products().len(), 1);
    }

    #[test]
    fn load_failure_and_retry() {
        let state = update(AppState::default(), AppEvent::LoadFailed("boom".to_string()));
        assert_eq!(state.catalog.failure(), Some("boom"));

        let state = update(state, AppEvent::Retry);
        assert!(state.catalog.is_loading());
        assert!(state.filters.is_idle());
    }

    #[test]
    fn retry_preserves_theme() {
        let state = update(AppState::default(), AppEvent::ThemeToggled);
        let state = update(state, AppEvent::Retry);
        assert_eq!(state.theme, Theme::Dark);
    }

    #[test]
    fn region_activation_narrows_filter() {
        let state = loaded_state();
        let state = update(state, AppEvent::RegionActivated("A".to_string()));
        assert_eq!(state.filters.states, vec!["A".to_string()]);
        assert_eq!(state.visible_products().len(), 2);
    }

    #[test]
    fn product_selection_roundtrip() {
        let state = loaded_state();
        let selected = product(3, "Lamp", "B");
        let state = update(state, AppEvent::ProductActivated(selected));
        assert_eq!(state.selected_product.as_ref().map(|p| p.id), Some(3));

        let state = update(state, AppEvent::ProductDismissed);
        assert!(state.selected_product.is_none());
    }

    #[test]
    fn district_layer_gates_map_level() {
        let state = loaded_state();
        assert_eq!(state.map_level(), Level::State);

        let state = update(state, AppEvent::DistrictLayerRequested);
        assert_eq!(state.map_level(), Level::State);
        assert!(state.district_boundaries.is_loading());

        let state = update(state, AppEvent::DistrictLayerLoaded(BoundarySet::default()));
        assert_eq!(state.map_level(), Level::District);
    }

    #[test]
    fn district_layer_request_is_idempotent_once_loaded() {
        let state = loaded_state();
        let state = update(state, AppEvent::DistrictLayerLoaded(BoundarySet::default()));
        let state = update(state, AppEvent::DistrictLayerRequested);
        assert_eq!(state.map_level(), Level::District);
    }

    #[test]
    fn district_layer_failure_falls_back_to_state_level() {
        let state = loaded_state();
        let state = update(state, AppEvent::DistrictLayerRequested);
        let state = update(state, AppEvent::DistrictLayerFailed("404".to_string()));
        assert_eq!(state.map_level(), Level::State);
        // A failed lazy load can be requested again.
        let state = update(state, AppEvent::DistrictLayerRequested);
        assert!(state.district_boundaries.is_loading());
    }

    #[test]
    fn theme_and_dropdown_toggles() {
        let state = update(AppState::default(), AppEvent::ThemeToggled);
        assert_eq!(state.theme, Theme::Dark);
        let state = update(state, AppEvent::ThemeToggled);
        assert_eq!(state.theme, Theme::Light);

        let state = update(state, AppEvent::DropdownToggled);
        assert!(state.dropdown_open);
    }
}
