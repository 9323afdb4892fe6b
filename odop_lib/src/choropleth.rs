//! Choropleth assembly: name resolution, bucketing, projection, and
//! pointer hit testing.
//!
//! A layer is built once per product snapshot and boundary dataset and
//! is read-only afterwards. Every boundary shape is resolved against the
//! aggregate key set; unmatched shapes render as no-data and do not
//! respond to the pointer.

use std::collections::{BTreeMap, HashMap};

use geo::{Centroid, Contains, MultiPolygon, Point};

use crate::boundary::BoundarySet;
use crate::color::{bucket_for, ColorBucket};
use crate::names;

/// Which boundary dataset the layer was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    State,
    District,
}

/// Spherical Mercator projection with an explicit center, scale, and
/// screen translation.
#[derive(Clone, Copy, Debug)]
pub struct Mercator {
    center: (f64, f64),
    scale: f64,
    translate: (f64, f64),
}

impl Mercator {
    pub fn new(center: (f64, f64), scale: f64, translate: (f64, f64)) -> Self {
        Self {
            center,
            scale,
            translate,
        }
    }

    /// Projection framing the Indian subcontinent in a viewport of the
    /// given size.
    pub fn fitted(width: f64, height: f64) -> Self {
        Self::new(
            (78.9629, 22.5937),
            width * 1.3,
            (width / 2.0, height / 2.0),
        )
    }

    fn raw(lon: f64, lat: f64) -> (f64, f64) {
        let x = lon.to_radians();
        let y = (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0)
            .tan()
            .ln();
        (x, y)
    }

    /// Projects a lon/lat coordinate to screen space.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let (x, y) = Self::raw(lon, lat);
        let (cx, cy) = Self::raw(self.center.0, self.center.1);
        (
            self.translate.0 + self.scale * (x - cx),
            self.translate.1 - self.scale * (y - cy),
        )
    }

    /// Inverts [`Mercator::project`], returning lon/lat for a screen point.
    pub fn unproject(&self, px: f64, py: f64) -> (f64, f64) {
        let (cx, cy) = Self::raw(self.center.0, self.center.1);
        let x = cx + (px - self.translate.0) / self.scale;
        let y = cy - (py - self.translate.1) / self.scale;
        let lon = x.to_degrees();
        let lat = (2.0 * y.exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
        (lon, lat)
    }
}

/// One boundary shape with its resolved region, count, and fill bucket.
#[derive(Debug, Clone)]
pub struct ChoroplethShape {
    /// The dataset's own spelling.
    pub boundary_name: String,
    /// Canonical catalog name, when resolution succeeded.
    pub region: Option<String>,
    pub count: usize,
    pub bucket: ColorBucket,
    /// Unmatched and zero-count shapes do not respond to the pointer.
    pub interactive: bool,
    pub geometry: MultiPolygon<f64>,
}

/// A fully assembled choropleth layer.
#[derive(Debug, Clone)]
pub struct ChoroplethLayer {
    pub level: Level,
    pub shapes: Vec<ChoroplethShape>,
    projection: Mercator,
}

impl ChoroplethLayer {
    /// Builds a layer by resolving every boundary shape against the
    /// aggregate key set and bucketing its product count.
    ///
    /// `counts` is keyed by canonical catalog names; its key order feeds
    /// the matcher's containment tier, so a `BTreeMap` keeps resolution
    /// deterministic.
    pub fn build(
        level: Level,
        boundaries: &BoundarySet,
        counts: &BTreeMap<String, usize>,
        aliases: &HashMap<String, String>,
        projection: Mercator,
    ) -> Self {
        let canonical: Vec<&str> = counts.keys().map(String::as_str).collect();

        let shapes = boundaries
            .shapes
            .iter()
            .map(|shape| {
                let region = names::resolve(&shape.name, aliases, &canonical);
                let count = region
                    .as_deref()
                    .and_then(|r| counts.get(r))
                    .copied()
                    .unwrap_or(0);
                ChoroplethShape {
                    boundary_name: shape.name.clone(),
                    region,
                    count,
                    bucket: bucket_for(count as i64),
                    interactive: count > 0,
                    geometry: shape.geometry.clone(),
                }
            })
            .collect();

        Self {
            level,
            shapes,
            projection,
        }
    }

    pub fn projection(&self) -> &Mercator {
        &self.projection
    }

    /// Hit test: returns the canonical region name under a screen point,
    /// skipping non-interactive shapes.
    pub fn region_at(&self, px: f64, py: f64) -> Option<&str> {
        let (lon, lat) = self.projection.unproject(px, py);
        let point = Point::new(lon, lat);
        self.shapes
            .iter()
            .filter(|shape| shape.interactive)
            .find(|shape| shape.geometry.contains(&point))
            .and_then(|shape| shape.region.as_deref())
    }

    /// A shape's polygon rings projected to screen space, for rendering.
    /// Exterior ring first, then any holes, per polygon.
    pub fn projected_rings(&self, shape: &ChoroplethShape) -> Vec<Vec<(f64, f64)>> {
        let mut rings = Vec::new();
        for polygon in &shape.geometry.0 {
            rings.push(
                polygon
                    .exterior()
                    .coords()
                    .map(|c| self.projection.project(c.x, c.y))
                    .collect(),
            );
            for interior in polygon.interiors() {
                rings.push(
                    interior
                        .coords()
                        .map(|c| self.projection.project(c.x, c.y))
                        .collect(),
                );
            }
        }
        rings
    }

    /// Screen position for a shape's count label: the projected centroid.
    pub fn label_point(&self, shape: &ChoroplethShape) -> Option<(f64, f64)> {
        shape
            .geometry
            .centroid()
            .map(|c| self.projection.project(c.x(), c.y()))
    }

    /// Shapes the matcher could not resolve, for coverage reporting.
    pub fn unmatched(&self) -> Vec<&str> {
        self.shapes
            .iter()
            .filter(|shape| shape.region.is_none())
            .map(|shape| shape.boundary_name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{BoundarySet, STATE_NAME_KEYS};

    fn squares() -> BoundarySet {
        // Three unit squares near the projection center.
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "NAME_1": "Odisha" },
                    "geometry": { "type": "Polygon", "coordinates":
                        [[[84.0, 20.0], [85.0, 20.0], [85.0, 21.0], [84.0, 21.0], [84.0, 20.0]]] }
                },
                {
                    "type": "Feature",
                    "properties": { "NAME_1": "Bihar" },
                    "geometry": { "type": "Polygon", "coordinates":
                        [[[85.0, 25.0], [86.0, 25.0], [86.0, 26.0], [85.0, 26.0], [85.0, 25.0]]] }
                },
                {
                    "type": "Feature",
                    "properties": { "NAME_1": "Ghost Province" },
                    "geometry": { "type": "Polygon", "coordinates":
                        [[[70.0, 10.0], [71.0, 10.0], [71.0, 11.0], [70.0, 11.0], [70.0, 10.0]]] }
                }
            ]
        }"#;
        BoundarySet::from_geojson_str(raw, STATE_NAME_KEYS).unwrap()
    }

    fn counts() -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        counts.insert("Odisha".to_string(), 12);
        counts.insert("Bihar".to_string(), 3);
        counts
    }

    fn layer() -> ChoroplethLayer {
        ChoroplethLayer::build(
            Level::State,
            &squares(),
            &counts(),
            &HashMap::new(),
            Mercator::fitted(1000.0, 700.0),
        )
    }

    #[test]
    fn projection_roundtrip() {
        let projection = Mercator::fitted(1000.0, 700.0);
        let (px, py) = projection.project(84.5, 20.5);
        let (lon, lat) = projection.unproject(px, py);
        assert!((lon - 84.5).abs() < 1e-9);
        assert!((lat - 20.5).abs() < 1e-9);
    }

    #[test]
    fn projection_center_maps_to_translate() {
        let projection = Mercator::fitted(1000.0, 700.0);
        let (px, py) = projection.project(78.9629, 22.5937);
        assert!((px - 500.0).abs() < 1e-9);
        assert!((py - 350.0).abs() < 1e-9);
    }

    #[test]
    fn build_resolves_and_buckets() {
        let layer = layer();
        assert_eq!(layer.shapes.len(), 3);

        let odisha = &layer.shapes[0];
        assert_eq!(odisha.region.as_deref(), Some("Odisha"));
        assert_eq!(odisha.count, 12);
        assert_eq!(odisha.bucket, ColorBucket::UpTo25);
        assert!(odisha.interactive);

        let ghost = &layer.shapes[2];
        assert_eq!(ghost.region, None);
        assert_eq!(ghost.count, 0);
        assert_eq!(ghost.bucket, ColorBucket::NoData);
        assert!(!ghost.interactive);
    }

    #[test]
    fn unmatched_shapes_are_reported() {
        let layer = layer();
        assert_eq!(layer.unmatched(), vec!["Ghost Province"]);
    }

    #[test]
    fn alias_applies_during_build() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "NAME_1": "Orissa" },
                "geometry": { "type": "Polygon", "coordinates":
                    [[[84.0, 20.0], [85.0, 20.0], [85.0, 21.0], [84.0, 21.0], [84.0, 20.0]]] }
            }]
        }"#;
        let boundaries = BoundarySet::from_geojson_str(raw, STATE_NAME_KEYS).unwrap();
        let aliases = crate::names::load_state_aliases().unwrap();
        let layer = ChoroplethLayer::build(
            Level::State,
            &boundaries,
            &counts(),
            &aliases,
            Mercator::fitted(1000.0, 700.0),
        );
        assert_eq!(layer.shapes[0].region.as_deref(), Some("Odisha"));
        assert_eq!(layer.shapes[0].count, 12);
    }

    #[test]
    fn region_at_hits_interactive_shape() {
        let layer = layer();
        let (px, py) = layer.projection().project(84.5, 20.5);
        assert_eq!(layer.region_at(px, py), Some("Odisha"));
    }

    #[test]
    fn region_at_ignores_no_data_shape() {
        let layer = layer();
        let (px, py) = layer.projection().project(70.5, 10.5);
        assert_eq!(layer.region_at(px, py), None);
    }

    #[test]
    fn region_at_misses_open_water() {
        let layer = layer();
        let (px, py) = layer.projection().project(90.0, 5.0);
        assert_eq!(layer.region_at(px, py), None);
    }

    #[test]
    fn projected_rings_are_closed() {
        let layer = layer();
        let rings = layer.projected_rings(&layer.shapes[0]);
        assert_eq!(rings.len(), 1);
        let ring = &rings[0];
        assert_eq!(ring.first(), ring.last());
        assert!(ring.len() >= 5);
    }

    #[test]
    fn label_point_inside_viewport() {
        let layer = layer();
        let (px, py) = layer.label_point(&layer.shapes[0]).unwrap();
        let (lon, lat) = layer.projection().unproject(px, py);
        assert!((lon - 84.5).abs() < 0.1);
        assert!((lat - 20.5).abs() < 0.1);
    }
}
