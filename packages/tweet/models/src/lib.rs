#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geotagged tweet record types.
//!
//! A [`Tweet`] is one short text message with an optional coordinate and a
//! creation timestamp. Records are immutable once materialized; the
//! aggregation pipeline consumes them as an ordered slice.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single geotagged message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    /// Latitude in decimal degrees. `None` when the record carries no
    /// location.
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees. `None` when the record carries no
    /// location.
    pub longitude: Option<f64>,
    /// When the message was created.
    pub created_at: NaiveDateTime,
    /// The message body. Always present, possibly empty.
    pub text: String,
}

impl Tweet {
    /// Returns `(latitude, longitude)` when both components are present.
    ///
    /// A record with only one coordinate component cannot be located and
    /// is treated the same as one with neither.
    #[must_use]
    pub const fn coordinate(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn coordinate_present() {
        let tweet = Tweet {
            latitude: Some(34.05),
            longitude: Some(-118.24),
            created_at: timestamp(),
            text: "great day".to_string(),
        };
        assert_eq!(tweet.coordinate(), Some((34.05, -118.24)));
    }

    #[test]
    fn coordinate_missing() {
        let tweet = Tweet {
            latitude: None,
            longitude: None,
            created_at: timestamp(),
            text: "noop".to_string(),
        };
        assert_eq!(tweet.coordinate(), None);
    }

    #[test]
    fn coordinate_partial_is_missing() {
        let tweet = Tweet {
            latitude: Some(34.05),
            longitude: None,
            created_at: timestamp(),
            text: "noop".to_string(),
        };
        assert_eq!(tweet.coordinate(), None);
    }
}
