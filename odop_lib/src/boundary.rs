//! Loading boundary polygon datasets.
//!
//! Two independent GeoJSON documents exist: state polygons and district
//! polygons. Each dataset stores its feature name under its own property
//! key, so extraction takes an ordered list of candidate keys. Geometry
//! is converted to `geo` multi-polygons for projection and hit testing.

use geo::{Geometry, MultiPolygon};
use geojson::GeoJson;
use thiserror::Error;

/// Property keys that may carry the state name, tried in order.
pub const STATE_NAME_KEYS: &[&str] = &["NAME_1", "st_nm", "ST_NM"];

/// Property key carrying the district name.
pub const DISTRICT_NAME_KEYS: &[&str] = &["NAME_2"];

/// Error types for boundary dataset loading.
#[derive(Error, Debug)]
pub enum BoundaryError {
    #[error("Failed to parse boundary GeoJSON: {0}")]
    Parse(#[from] geojson::Error),
    #[error("Boundary document is not a feature collection")]
    NotFeatureCollection,
}

/// One named polygon (or multi-polygon) from a boundary dataset.
#[derive(Debug, Clone)]
pub struct BoundaryShape {
    /// The raw dataset name, unreconciled with catalog spellings.
    pub name: String,
    pub geometry: MultiPolygon<f64>,
}

/// A parsed boundary dataset.
#[derive(Debug, Clone, Default)]
pub struct BoundarySet {
    pub shapes: Vec<BoundaryShape>,
}

impl BoundarySet {
    /// Parses a GeoJSON feature collection, extracting each feature's
    /// name from the first present key in `name_keys`.
    ///
    /// Features without a usable name or without areal geometry are
    /// skipped, not errors: a nameless sliver in the source data must
    /// not sink the whole map.
    pub fn from_geojson_str(raw: &str, name_keys: &[&str]) -> Result<BoundarySet, BoundaryError> {
        let geojson: GeoJson = raw.parse()?;
        let collection = match geojson {
            GeoJson::FeatureCollection(fc) => fc,
            _ => return Err(BoundaryError::NotFeatureCollection),
        };

        let mut shapes = Vec::new();
        for feature in collection.features {
            let name = feature
                .properties
                .as_ref()
                .and_then(|props| {
                    name_keys
                        .iter()
                        .find_map(|key| props.get(*key).and_then(|v| v.as_str()))
                })
                .map(str::trim)
                .filter(|s| !s.is_empty());

            let Some(name) = name else {
                tracing::debug!("skipping boundary feature without a name property");
                continue;
            };

            let Some(gj_geometry) = feature.geometry else {
                tracing::debug!(name, "skipping boundary feature without geometry");
                continue;
            };

            let geometry: Geometry<f64> = match gj_geometry.value.try_into() {
                Ok(geometry) => geometry,
                Err(e) => {
                    tracing::warn!(name, "unusable boundary geometry: {}", e);
                    continue;
                }
            };
            let multi = match geometry {
                Geometry::Polygon(polygon) => polygon.into(),
                Geometry::MultiPolygon(multi) => multi,
                _ => {
                    tracing::debug!(name, "skipping non-areal boundary geometry");
                    continue;
                }
            };

            shapes.push(BoundaryShape {
                name: name.to_string(),
                geometry: multi,
            });
        }

        Ok(BoundarySet { shapes })
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
