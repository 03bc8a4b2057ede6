#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-region sentiment aggregation.
//!
//! Drives the lexicon scorer and region index over an ordered record
//! sequence, accumulating a running sum and count per region plus
//! diagnostic counters for every excluded record. One aggregation run is
//! strictly sequential and owns its own state; the lexicon and index are
//! only read.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tweet_map_lexicon::SentimentLexicon;
use tweet_map_spatial::RegionIndex;
use tweet_map_tweet_models::Tweet;

/// Errors that can occur during aggregation.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The record sequence was empty. Distinct from "records present but
    /// nothing usable", which yields an empty mean mapping instead.
    #[error("dataset contains no records")]
    EmptyDataset,
}

/// Diagnostic counters for one aggregation run.
///
/// Every record increments `total` and exactly one of the exclusion
/// counters, or contributes to exactly one region's statistics:
/// `total == missing_coordinates + no_sentiment_signal + unresolved_region
/// + Σ per-region counts`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCounters {
    /// Records processed.
    pub total: u64,
    /// Records with no usable coordinate.
    pub missing_coordinates: u64,
    /// Located records whose text matched no lexicon word.
    pub no_sentiment_signal: u64,
    /// Scored records whose point fell inside no region.
    pub unresolved_region: u64,
}

impl RunCounters {
    /// Records that contributed to a region's statistics.
    #[must_use]
    pub const fn scored(&self) -> u64 {
        self.total - self.missing_coordinates - self.no_sentiment_signal - self.unresolved_region
    }
}

/// The result of one aggregation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Mean sentiment score per region. Regions with zero contributions
    /// do not appear.
    pub means: BTreeMap<String, f64>,
    /// Diagnostic counters for the run.
    pub counters: RunCounters,
}

/// Running sum and count for one region.
#[derive(Debug, Default)]
struct RegionStats {
    sum: f64,
    count: u64,
}

/// Aggregates sentiment scores per region over an ordered record slice.
///
/// Per record: a missing coordinate, a text with no lexicon signal, or a
/// point no region contains each increment one counter and exclude the
/// record; otherwise its score joins the resolved region's running
/// statistics. Individual records never fail the run.
///
/// # Errors
///
/// Returns [`AnalyticsError::EmptyDataset`] when `records` is empty.
pub fn aggregate(
    records: &[Tweet],
    lexicon: &SentimentLexicon,
    regions: &RegionIndex,
) -> Result<Aggregation, AnalyticsError> {
    if records.is_empty() {
        return Err(AnalyticsError::EmptyDataset);
    }

    let mut counters = RunCounters::default();
    let mut stats: BTreeMap<String, RegionStats> = BTreeMap::new();

    for record in records {
        counters.total += 1;

        let Some((latitude, longitude)) = record.coordinate() else {
            counters.missing_coordinates += 1;
            continue;
        };
        let Some(score) = lexicon.analyze(&record.text) else {
            counters.no_sentiment_signal += 1;
            continue;
        };
        let Some(region) = regions.locate(latitude, longitude) else {
            counters.unresolved_region += 1;
            continue;
        };

        let entry = stats.entry(region.to_string()).or_default();
        entry.sum += score;
        entry.count += 1;
    }

    log::info!(
        "Aggregated {} records: {} scored, {} missing coordinates, {} without signal, {} unresolved",
        counters.total,
        counters.scored(),
        counters.missing_coordinates,
        counters.no_sentiment_signal,
        counters.unresolved_region,
    );

    #[allow(clippy::cast_precision_loss)]
    let means = stats
        .into_iter()
        .map(|(region, stats)| (region, stats.sum / stats.count as f64))
        .collect();

    Ok(Aggregation { means, counters })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use tweet_map_geography_models::{PolygonRings, Region, RegionGeometry, Ring};

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn tweet(latitude: Option<f64>, longitude: Option<f64>, text: &str) -> Tweet {
        Tweet {
            latitude,
            longitude,
            created_at: timestamp(),
            text: text.to_string(),
        }
    }

    fn lexicon() -> SentimentLexicon {
        SentimentLexicon::from_csv_reader("word,score\ngreat,1.0\nbad,-1.0\n".as_bytes()).unwrap()
    }

    fn region(name: &str, shell: Ring) -> Region {
        Region {
            name: name.to_string(),
            geometry: RegionGeometry::Polygon(PolygonRings {
                shell,
                holes: vec![],
            }),
        }
    }

    /// Two square regions in (lon, lat): one around Los Angeles, one
    /// around New York City.
    fn index() -> RegionIndex {
        RegionIndex::from_regions(vec![
            region(
                "California",
                vec![[-125.0, 32.0], [-114.0, 32.0], [-114.0, 42.0], [-125.0, 42.0]],
            ),
            region(
                "New York",
                vec![[-80.0, 40.0], [-71.0, 40.0], [-71.0, 45.0], [-80.0, 45.0]],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn empty_input_is_an_error() {
        let result = aggregate(&[], &lexicon(), &index());
        assert!(matches!(result, Err(AnalyticsError::EmptyDataset)));
    }

    #[test]
    fn classifies_each_record_once() {
        let records = vec![
            tweet(Some(34.05), Some(-118.24), "great day"),
            tweet(Some(40.71), Some(-74.00), "bad day"),
            tweet(None, None, "noop"),
            tweet(Some(34.05), Some(-118.24), "nothing matches"),
            tweet(Some(0.0), Some(0.0), "great"),
        ];
        let aggregation = aggregate(&records, &lexicon(), &index()).unwrap();

        assert_eq!(aggregation.counters.total, 5);
        assert_eq!(aggregation.counters.missing_coordinates, 1);
        assert_eq!(aggregation.counters.no_sentiment_signal, 1);
        assert_eq!(aggregation.counters.unresolved_region, 1);
        assert_eq!(aggregation.counters.scored(), 2);

        let contributed: u64 = aggregation.counters.scored();
        assert_eq!(
            aggregation.counters.total,
            aggregation.counters.missing_coordinates
                + aggregation.counters.no_sentiment_signal
                + aggregation.counters.unresolved_region
                + contributed
        );
    }

    #[test]
    fn means_are_per_region_averages() {
        let records = vec![
            tweet(Some(34.05), Some(-118.24), "great day"),
            tweet(Some(34.06), Some(-118.25), "bad day"),
            tweet(Some(40.71), Some(-74.00), "great great"),
        ];
        let aggregation = aggregate(&records, &lexicon(), &index()).unwrap();

        assert_eq!(aggregation.means.len(), 2);
        assert_eq!(aggregation.means["California"], 0.0);
        assert_eq!(aggregation.means["New York"], 1.0);
    }

    #[test]
    fn all_excluded_yields_empty_means() {
        let records = vec![
            tweet(None, None, "great"),
            tweet(Some(0.0), Some(0.0), "great"),
            tweet(Some(34.05), Some(-118.24), "no signal here"),
        ];
        let aggregation = aggregate(&records, &lexicon(), &index()).unwrap();

        assert!(aggregation.means.is_empty());
        assert_eq!(aggregation.counters.total, 3);
        assert_eq!(aggregation.counters.scored(), 0);
    }

    #[test]
    fn zero_contribution_regions_are_absent() {
        let records = vec![tweet(Some(34.05), Some(-118.24), "great")];
        let aggregation = aggregate(&records, &lexicon(), &index()).unwrap();
        assert!(!aggregation.means.contains_key("New York"));
    }

    /// Full pipeline: two regions receive scores, one record has no
    /// coordinate, and the colors land on the gradient extremes.
    #[test]
    fn end_to_end_with_colorization() {
        let records = vec![
            tweet(Some(34.05), Some(-118.24), "great day"),
            tweet(Some(40.71), Some(-74.00), "bad day"),
            tweet(None, None, "noop"),
        ];
        let aggregation = aggregate(&records, &lexicon(), &index()).unwrap();

        assert_eq!(aggregation.means.len(), 2);
        assert_eq!(aggregation.counters.missing_coordinates, 1);

        let colors = tweet_map_color::colorize(&aggregation.means);
        assert_eq!(colors["California"], "#ff0000");
        assert_eq!(colors["New York"], "#0000ff");
    }
}
