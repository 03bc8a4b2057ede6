#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! In-memory region index for point-in-polygon attribution.
//!
//! Loads named region polygons from a JSON source at startup, builds an
//! R-tree over their bounding boxes, and answers point-containment
//! queries. Constructed once and shared read-only across all aggregation
//! runs.

pub mod load;

use geo::{Contains, LineString, MultiPolygon, Polygon};
use rstar::{AABB, RTree, RTreeObject};
use std::path::Path;
use thiserror::Error;
use tweet_map_geography_models::{PolygonRings, Region, Ring};

/// Errors that can occur while building the region index.
#[derive(Debug, Error)]
pub enum RegionError {
    /// The region source could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The region source is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The region source is not a valid feature collection.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The region source has a shape neither loader understands.
    #[error("Unsupported region source shape: {0}")]
    UnsupportedShape(String),

    /// Every region in the source was skipped as malformed.
    #[error("region source contained no valid regions")]
    Empty,
}

/// A region stored in the R-tree with its load position.
struct RegionEntry {
    /// Position in the source; ties between overlapping regions resolve
    /// to the lowest value.
    load_order: usize,
    name: String,
    envelope: AABB<[f64; 2]>,
    polygon: MultiPolygon<f64>,
}

impl RTreeObject for RegionEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Pre-built spatial index over named regions.
///
/// Immutable after load; safe for unsynchronized concurrent reads.
pub struct RegionIndex {
    regions: RTree<RegionEntry>,
}

impl RegionIndex {
    /// Loads regions from a JSON file and builds the index.
    ///
    /// The source shape (code-keyed coordinate map or GeoJSON feature
    /// collection) is sniffed once; see [`load::parse_source`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the JSON fails to
    /// parse, or no valid region survives loading. Individual malformed
    /// rings and regions are skipped with a warning instead.
    pub fn from_json_path(path: &Path) -> Result<Self, RegionError> {
        let text = std::fs::read_to_string(path)?;
        let regions = load::parse_source(&text)?;
        let index = Self::from_regions(regions)?;
        log::info!("Loaded {} regions from {}", index.len(), path.display());
        Ok(index)
    }

    /// Builds the index from already-parsed regions.
    ///
    /// A polygon with any ring of fewer than 3 points is skipped; a region
    /// left with zero valid polygons is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::Empty`] if no region survives validation.
    pub fn from_regions(regions: Vec<Region>) -> Result<Self, RegionError> {
        let mut entries = Vec::new();

        for (load_order, region) in regions.into_iter().enumerate() {
            let polygons: Vec<Polygon<f64>> = region
                .geometry
                .polygons()
                .iter()
                .filter_map(|rings| build_polygon(&region.name, rings))
                .collect();

            if polygons.is_empty() {
                log::warn!("Dropping region {} with no valid polygons", region.name);
                continue;
            }

            let polygon = MultiPolygon(polygons);
            let envelope = compute_envelope(&polygon);
            entries.push(RegionEntry {
                load_order,
                name: region.name,
                envelope,
                polygon,
            });
        }

        if entries.is_empty() {
            return Err(RegionError::Empty);
        }

        Ok(Self {
            regions: RTree::bulk_load(entries),
        })
    }

    /// Look up the region containing a point.
    ///
    /// The query point is built as `(x = longitude, y = latitude)`.
    /// Containment is boundary-exclusive: a point exactly on a shell or
    /// hole edge is outside. A point inside a shell but inside one of its
    /// holes is outside. When overlapping regions both contain the point,
    /// the first-loaded region wins.
    #[must_use]
    pub fn locate(&self, latitude: f64, longitude: f64) -> Option<&str> {
        let point = geo::Point::new(longitude, latitude);
        let query_env = AABB::from_point([longitude, latitude]);

        self.regions
            .locate_in_envelope_intersecting(&query_env)
            .filter(|entry| entry.polygon.contains(&point))
            .min_by_key(|entry| entry.load_order)
            .map(|entry| entry.name.as_str())
    }

    /// Number of regions in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.size()
    }

    /// Whether the index holds no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.size() == 0
    }
}

/// Converts validated rings into a [`Polygon`], or skips the feature.
///
/// Rings may arrive open or closed; [`Polygon::new`] closes them.
fn build_polygon(name: &str, rings: &PolygonRings) -> Option<Polygon<f64>> {
    if !ring_is_valid(&rings.shell) {
        log::warn!("Skipping polygon of {name}: shell has fewer than 3 points");
        return None;
    }
    for hole in &rings.holes {
        if !ring_is_valid(hole) {
            log::warn!("Skipping polygon of {name}: hole has fewer than 3 points");
            return None;
        }
    }

    let shell = ring_to_line_string(&rings.shell);
    let holes = rings.holes.iter().map(ring_to_line_string).collect();
    Some(Polygon::new(shell, holes))
}

fn ring_is_valid(ring: &Ring) -> bool {
    ring.len() >= 3
}

fn ring_to_line_string(ring: &Ring) -> LineString<f64> {
    LineString::from(
        ring.iter()
            .map(|point| (point[0], point[1]))
            .collect::<Vec<_>>(),
    )
}

/// Compute the bounding box envelope for a [`MultiPolygon`].
fn compute_envelope(mp: &MultiPolygon<f64>) -> AABB<[f64; 2]> {
    use geo::BoundingRect;

    mp.bounding_rect().map_or_else(
        || AABB::from_point([0.0, 0.0]),
        |rect| AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
    )
}
