#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Score-to-color interpolation for map display.
//!
//! Normalizes per-region mean scores to `[0, 1]` via min-max and maps
//! them through a three-segment blue-cyan-yellow-red gradient. Output is
//! a lower-case `#rrggbb` hex string per region.

use std::collections::BTreeMap;

/// Color used when every region has the same mean (zero range). Also the
/// gradient's value at `t = 0.75`.
pub const NEUTRAL_COLOR: &str = "#ffff00";

/// Maps per-region mean scores to hex colors.
///
/// Scores are min-max normalized over the input values; a zero range
/// (single region, or all means equal) maps every region to
/// [`NEUTRAL_COLOR`]. Identical inputs always produce identical outputs.
#[must_use]
pub fn colorize(means: &BTreeMap<String, f64>) -> BTreeMap<String, String> {
    let Some(min_score) = means.values().copied().reduce(f64::min) else {
        return BTreeMap::new();
    };
    let max_score = means
        .values()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let range = max_score - min_score;

    means
        .iter()
        .map(|(region, score)| {
            let color = if range == 0.0 {
                NEUTRAL_COLOR.to_string()
            } else {
                gradient_hex((score - min_score) / range)
            };
            (region.clone(), color)
        })
        .collect()
}

/// Renders a normalized score `t ∈ [0, 1]` as a gradient hex color.
///
/// Three piecewise-linear segments: blue to cyan on `[0, 0.25]`, cyan to
/// yellow on `(0.25, 0.75]`, yellow to red on `(0.75, 1.0]`. Channel
/// values truncate toward zero.
#[must_use]
pub fn gradient_hex(t: f64) -> String {
    let (red, green, blue) = if t <= 0.25 {
        (0, channel(t / 0.25), 255)
    } else if t <= 0.75 {
        let local = (t - 0.25) / 0.5;
        (channel(local), 255, channel(1.0 - local))
    } else {
        (255, channel(1.0 - (t - 0.75) / 0.25), 0)
    };
    format!("#{red:02x}{green:02x}{blue:02x}")
}

/// Truncates `255 × ratio` to an 8-bit channel value.
fn channel(ratio: f64) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let value = (255.0 * ratio) as u8;
    value
}
