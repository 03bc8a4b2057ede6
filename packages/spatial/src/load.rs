//! Region source parsing.
//!
//! Two source shapes are supported, sniffed once at this boundary:
//!
//! 1. A JSON object keyed by region code, each value an ordered list of
//!    nested coordinate arrays. Array nesting depth selects the variant:
//!    depth 3 is a single polygon (rings of points), depth 4 a list of
//!    polygons.
//! 2. A GeoJSON feature collection whose features carry Polygon or
//!    `MultiPolygon` geometry and a `name` property.
//!
//! Both shapes produce tagged [`RegionGeometry`] values; downstream code
//! never re-inspects nesting depth.

use serde_json::Value;
use tweet_map_geography_models::{PolygonRings, Region, RegionGeometry, Ring, states};

use crate::RegionError;

/// Parses a region source, sniffing its shape.
///
/// # Errors
///
/// Returns an error if the text is not valid JSON or matches neither
/// supported shape. Malformed individual geometries are skipped with a
/// warning.
pub fn parse_source(text: &str) -> Result<Vec<Region>, RegionError> {
    let value: Value = serde_json::from_str(text)?;
    if value.get("type").and_then(Value::as_str) == Some("FeatureCollection") {
        parse_feature_collection(text)
    } else {
        parse_code_map(&value)
    }
}

/// Parses the code-keyed coordinate-map shape.
fn parse_code_map(value: &Value) -> Result<Vec<Region>, RegionError> {
    let Some(map) = value.as_object() else {
        return Err(RegionError::UnsupportedShape(
            "expected a JSON object keyed by region code".to_string(),
        ));
    };

    let mut regions = Vec::new();

    for (key, geometries) in map {
        let Some(list) = geometries.as_array() else {
            log::warn!("Skipping region {key}: value is not a geometry list");
            continue;
        };

        let mut polygons = Vec::new();
        for geometry in list {
            match array_depth(geometry) {
                Some(3) => {
                    if let Some(polygon) = parse_polygon(key, geometry) {
                        polygons.push(polygon);
                    }
                }
                Some(4) => {
                    for nested in geometry.as_array().into_iter().flatten() {
                        if let Some(polygon) = parse_polygon(key, nested) {
                            polygons.push(polygon);
                        }
                    }
                }
                _ => log::warn!("Skipping geometry of {key} with unexpected nesting"),
            }
        }

        if polygons.is_empty() {
            log::warn!("Skipping region {key}: no parseable geometry");
            continue;
        }

        let geometry = if polygons.len() == 1 {
            RegionGeometry::Polygon(polygons.remove(0))
        } else {
            RegionGeometry::MultiPolygon(polygons)
        };
        regions.push(Region {
            name: region_name(key),
            geometry,
        });
    }

    Ok(regions)
}

/// Parses the GeoJSON feature-collection shape.
fn parse_feature_collection(text: &str) -> Result<Vec<Region>, RegionError> {
    let geojson: geojson::GeoJson = text.parse()?;
    let geojson::GeoJson::FeatureCollection(collection) = geojson else {
        return Err(RegionError::UnsupportedShape(
            "expected a FeatureCollection".to_string(),
        ));
    };

    let mut regions = Vec::new();

    for feature in collection.features {
        let name = feature
            .properties
            .as_ref()
            .and_then(|props| props.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();

        let Some(geometry) = feature.geometry else {
            log::warn!("Skipping feature {name} without geometry");
            continue;
        };
        let Some(region_geometry) = convert_geojson_geometry(&geometry.value) else {
            log::warn!("Skipping feature {name} with non-polygon geometry");
            continue;
        };

        regions.push(Region {
            name,
            geometry: region_geometry,
        });
    }

    Ok(regions)
}

/// Resolves a source key to a display name.
///
/// Two-letter keys are treated as state codes and translated through the
/// static table (unrecognized codes become `"Unknown"`); longer keys are
/// taken as direct names.
fn region_name(key: &str) -> String {
    if key.len() == 2 && key.chars().all(|c| c.is_ascii_alphabetic()) {
        states::state_name(&key.to_uppercase()).to_string()
    } else {
        key.to_string()
    }
}

/// Nesting depth of a JSON array down its first elements, or `None` for
/// an empty array or a non-array value.
fn array_depth(value: &Value) -> Option<usize> {
    let mut depth = 0;
    let mut current = value;
    while let Some(array) = current.as_array() {
        depth += 1;
        current = array.first()?;
    }
    (depth > 0).then_some(depth)
}

/// Parses one polygon as an array of rings, shell first.
fn parse_polygon(key: &str, value: &Value) -> Option<PolygonRings> {
    let raw_rings = value.as_array()?;
    let mut rings = Vec::with_capacity(raw_rings.len());
    for raw_ring in raw_rings {
        let Some(ring) = parse_ring(raw_ring) else {
            log::warn!("Skipping polygon of {key}: malformed ring");
            return None;
        };
        rings.push(ring);
    }

    if rings.is_empty() {
        return None;
    }
    let shell = rings.remove(0);
    Some(PolygonRings {
        shell,
        holes: rings,
    })
}

/// Parses one ring as an array of `[longitude, latitude]` points.
fn parse_ring(value: &Value) -> Option<Ring> {
    let points = value.as_array()?;
    let mut ring = Ring::with_capacity(points.len());
    for point in points {
        let coords = point.as_array()?;
        let lon = coords.first()?.as_f64()?;
        let lat = coords.get(1)?.as_f64()?;
        ring.push([lon, lat]);
    }
    Some(ring)
}

/// Converts a GeoJSON geometry into the tagged variant.
fn convert_geojson_geometry(value: &geojson::Value) -> Option<RegionGeometry> {
    match value {
        geojson::Value::Polygon(rings) => {
            Some(RegionGeometry::Polygon(polygon_from_positions(rings)?))
        }
        geojson::Value::MultiPolygon(polygons) => {
            let converted: Vec<PolygonRings> = polygons
                .iter()
                .filter_map(|rings| polygon_from_positions(rings))
                .collect();
            (!converted.is_empty()).then_some(RegionGeometry::MultiPolygon(converted))
        }
        _ => None,
    }
}

/// Converts GeoJSON ring positions into [`PolygonRings`].
fn polygon_from_positions(rings: &[Vec<Vec<f64>>]) -> Option<PolygonRings> {
    let mut converted = Vec::with_capacity(rings.len());
    for ring in rings {
        let mut points = Ring::with_capacity(ring.len());
        for position in ring {
            let lon = *position.first()?;
            let lat = *position.get(1)?;
            points.push([lon, lat]);
        }
        converted.push(points);
    }

    if converted.is_empty() {
        return None;
    }
    let shell = converted.remove(0);
    Some(PolygonRings {
        shell,
        holes: converted,
    })
}
