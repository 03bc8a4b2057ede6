#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Line-oriented tweet upload parsing.
//!
//! Uploaded files carry one record per line:
//!
//! ```text
//! [34.0522, -118.2437] _ 2024-06-01 12:00:00 great day in the city
//! ```
//!
//! Parsing recovers per line: a bad line is recorded with its line number
//! and parsing continues, so one malformed row never rejects a whole
//! upload.

use chrono::NaiveDateTime;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;
use tweet_map_tweet_models::Tweet;

/// One upload line: `[lat, lon] _ YYYY-MM-DD HH:MM:SS text`.
static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(-?\d+\.\d+),\s*(-?\d+\.\d+)\]\s+_\s+(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})\s+(.*)$")
        .expect("valid regex")
});

/// Characters that cannot appear in a dataset name.
static NON_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W").expect("valid regex"));

/// Errors for a single upload line.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The line does not match the expected format.
    #[error("line does not match the expected record format")]
    Format,

    /// The timestamp field is not a valid datetime.
    #[error("invalid timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

/// A parse failure tied to its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    /// 1-based line number within the upload.
    pub line: usize,
    /// What went wrong.
    pub message: String,
}

/// The outcome of parsing one upload.
#[derive(Debug, Clone, Default)]
pub struct UploadOutcome {
    /// Successfully parsed records, in input order.
    pub tweets: Vec<Tweet>,
    /// Per-line failures, in input order.
    pub errors: Vec<LineError>,
}

/// Parses one upload line into a [`Tweet`].
///
/// # Errors
///
/// Returns [`IngestError::Format`] when the line does not match the
/// record grammar and [`IngestError::Timestamp`] when the matched
/// timestamp fails to parse as a datetime.
pub fn parse_line(line: &str) -> Result<Tweet, IngestError> {
    let caps = LINE_RE.captures(line.trim()).ok_or(IngestError::Format)?;

    // The coordinate groups only match signed decimal digits, so float
    // parsing cannot fail here.
    let latitude: f64 = caps[1].parse().map_err(|_| IngestError::Format)?;
    let longitude: f64 = caps[2].parse().map_err(|_| IngestError::Format)?;
    let created_at = NaiveDateTime::parse_from_str(&caps[3], "%Y-%m-%d %H:%M:%S")?;

    Ok(Tweet {
        latitude: Some(latitude),
        longitude: Some(longitude),
        created_at,
        text: caps[4].to_string(),
    })
}

/// Parses a whole upload body, one record per line.
///
/// Blank lines are skipped. Failing lines are collected with their line
/// numbers; parsing never fails as a whole.
#[must_use]
pub fn parse_upload(body: &str) -> UploadOutcome {
    let mut outcome = UploadOutcome::default();

    for (index, line) in body.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(tweet) => outcome.tweets.push(tweet),
            Err(e) => outcome.errors.push(LineError {
                line: index + 1,
                message: e.to_string(),
            }),
        }
    }

    log::debug!(
        "Parsed upload: {} records, {} bad lines",
        outcome.tweets.len(),
        outcome.errors.len()
    );

    outcome
}

/// Derives a dataset name from an uploaded filename.
///
/// Strips the extension, replaces every non-word character with an
/// underscore, and lower-cases the result.
#[must_use]
pub fn sanitize_dataset_name(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(filename);
    NON_WORD_RE.replace_all(stem, "_").to_lowercase()
}
