#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory named dataset store.
//!
//! The record supplier for the aggregation pipeline: each upload becomes
//! a named dataset that lives for the process lifetime. Aggregates are
//! never stored; each analysis run re-reads the raw records.

use std::collections::BTreeMap;
use std::sync::RwLock;
use thiserror::Error;
use tweet_map_tweet_models::Tweet;

/// Errors that can occur when reading from the store.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// No dataset with the requested name exists.
    #[error("dataset not found: {0}")]
    NotFound(String),
}

/// Named record sequences keyed by sanitized dataset name.
///
/// Readers take a shared lock, so concurrent analysis runs do not block
/// each other.
#[derive(Debug, Default)]
pub struct DatasetStore {
    datasets: RwLock<BTreeMap<String, Vec<Tweet>>>,
}

impl DatasetStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores records under a dataset name, replacing any existing rows.
    ///
    /// Re-uploading a dataset discards its previous contents. Returns the
    /// stored record count.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    pub fn replace(&self, name: &str, records: Vec<Tweet>) -> usize {
        let count = records.len();
        let mut datasets = self.datasets.write().expect("dataset store lock poisoned");
        if datasets.insert(name.to_string(), records).is_some() {
            log::info!("Replaced dataset {name} with {count} records");
        } else {
            log::info!("Stored dataset {name} with {count} records");
        }
        count
    }

    /// Returns a copy of a dataset's records, in upload order.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::NotFound`] for an unknown name.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    pub fn records(&self, name: &str) -> Result<Vec<Tweet>, DatasetError> {
        let datasets = self.datasets.read().expect("dataset store lock poisoned");
        datasets
            .get(name)
            .cloned()
            .ok_or_else(|| DatasetError::NotFound(name.to_string()))
    }

    /// Lists dataset names in sorted order.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let datasets = self.datasets.read().expect("dataset store lock poisoned");
        datasets.keys().cloned().collect()
    }
}
