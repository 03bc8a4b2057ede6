#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Administrative region geometry types.
//!
//! A [`Region`] pairs a display name with a tagged geometry variant. The
//! variant is decided once by the loader that reads the region source; the
//! containment code never inspects raw nested lists.

pub mod states;

use serde::{Deserialize, Serialize};

/// An ordered sequence of `(longitude, latitude)` points.
///
/// Rings may arrive open (first point != last point) or closed; the
/// containment layer handles both.
pub type Ring = Vec<[f64; 2]>;

/// One polygon as a shell ring plus zero or more hole rings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonRings {
    /// The outer boundary.
    pub shell: Ring,
    /// Excluded inner rings, assumed nested inside the shell.
    pub holes: Vec<Ring>,
}

/// Region geometry, tagged by shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegionGeometry {
    /// A single polygon.
    Polygon(PolygonRings),
    /// A set of polygons; a point is in the region if it is in any of them.
    MultiPolygon(Vec<PolygonRings>),
}

impl RegionGeometry {
    /// All constituent polygons, regardless of variant.
    #[must_use]
    pub fn polygons(&self) -> &[PolygonRings] {
        match self {
            Self::Polygon(polygon) => std::slice::from_ref(polygon),
            Self::MultiPolygon(polygons) => polygons,
        }
    }
}

/// A named geographic region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Display name (e.g. "California"), or `"Unknown"` when the source
    /// carried a code outside the state table.
    pub name: String,
    /// The region's geometry.
    pub geometry: RegionGeometry,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Ring {
        vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]
    }

    #[test]
    fn polygon_variant_yields_one_polygon() {
        let geometry = RegionGeometry::Polygon(PolygonRings {
            shell: square(),
            holes: vec![],
        });
        assert_eq!(geometry.polygons().len(), 1);
    }

    #[test]
    fn multi_polygon_variant_yields_all_polygons() {
        let polygon = PolygonRings {
            shell: square(),
            holes: vec![],
        };
        let geometry = RegionGeometry::MultiPolygon(vec![polygon.clone(), polygon]);
        assert_eq!(geometry.polygons().len(), 2);
    }
}
