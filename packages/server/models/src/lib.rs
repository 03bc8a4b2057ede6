#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the tweet map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the pipeline types to allow independent evolution of the API
//! contract.

use serde::Serialize;
use std::collections::BTreeMap;
use tweet_map_analytics::RunCounters;
use tweet_map_ingest::LineError;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is up.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Diagnostic counters as exposed by the API.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCounters {
    /// Records processed.
    pub total: u64,
    /// Records with no usable coordinate.
    pub missing_coordinates: u64,
    /// Records whose text matched no lexicon word.
    pub no_sentiment_signal: u64,
    /// Records whose point fell inside no region.
    pub unresolved_region: u64,
}

impl From<RunCounters> for ApiCounters {
    fn from(counters: RunCounters) -> Self {
        Self {
            total: counters.total,
            missing_coordinates: counters.missing_coordinates,
            no_sentiment_signal: counters.no_sentiment_signal,
            unresolved_region: counters.unresolved_region,
        }
    }
}

/// Summary of one processed upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUploadSummary {
    /// Sanitized dataset name the records were stored under.
    pub dataset: String,
    /// Records stored from this upload. Re-uploading a dataset replaces
    /// its previous contents.
    pub records_stored: usize,
    /// Lines that failed to parse, as `"line N: reason"`.
    pub errors: Vec<String>,
}

impl ApiUploadSummary {
    /// Formats per-line parse failures for the response body.
    #[must_use]
    pub fn format_errors(errors: &[LineError]) -> Vec<String> {
        errors
            .iter()
            .map(|e| format!("line {}: {}", e.line, e.message))
            .collect()
    }
}

/// Dataset listing response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTables {
    /// Known dataset names, sorted.
    pub tables: Vec<String>,
}

/// Per-region mean sentiment response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAggregation {
    /// Mean score per region.
    pub means: BTreeMap<String, f64>,
    /// Diagnostic counters for the run.
    pub counters: ApiCounters,
}

/// Per-region color response (full pipeline).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiColors {
    /// Hex color per region.
    pub colors: BTreeMap<String, String>,
    /// Diagnostic counters for the run.
    pub counters: ApiCounters,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_convert_field_for_field() {
        let counters = RunCounters {
            total: 5,
            missing_coordinates: 1,
            no_sentiment_signal: 2,
            unresolved_region: 1,
        };
        let api: ApiCounters = counters.into();
        assert_eq!(api.total, 5);
        assert_eq!(api.missing_coordinates, 1);
        assert_eq!(api.no_sentiment_signal, 2);
        assert_eq!(api.unresolved_region, 1);
    }

    #[test]
    fn line_errors_format_with_line_numbers() {
        let errors = vec![LineError {
            line: 3,
            message: "line does not match the expected record format".to_string(),
        }];
        let formatted = ApiUploadSummary::format_errors(&errors);
        assert_eq!(
            formatted,
            vec!["line 3: line does not match the expected record format"]
        );
    }
}
