//! Scale aggregation
//!
//! Reduces encoded responses to one rounded mean per scale, in table
//! declaration order. Absent points are skipped, and a scale with no present
//! points yields an absent result rather than zero.

use crate::scales::{ScaleDefinition, ScaleTable};
use crate::types::{EncodedResponses, ScaleResult};
use log::debug;

/// Aggregator for computing scale means
pub struct ScaleAggregator;

impl ScaleAggregator {
    /// Aggregate against the canonical table
    pub fn aggregate(encoded: &EncodedResponses) -> Vec<ScaleResult> {
        Self::aggregate_with(encoded, ScaleTable::canonical())
    }

    /// Aggregate against an explicit table
    pub fn aggregate_with(encoded: &EncodedResponses, table: &ScaleTable) -> Vec<ScaleResult> {
        let results: Vec<ScaleResult> = table
            .iter()
            .map(|scale| ScaleResult {
                scale: scale.name.clone(),
                score: scale_mean(encoded, scale),
            })
            .collect();

        debug!(
            "aggregated {} scales, {} with a score",
            results.len(),
            results.iter().filter(|r| r.score.is_some()).count()
        );
        results
    }
}

/// Mean of the present member points, rounded to 2 decimals
fn scale_mean(encoded: &EncodedResponses, scale: &ScaleDefinition) -> Option<f64> {
    let points: Vec<f64> = scale
        .questions
        .iter()
        .filter_map(|&index| encoded.get(index))
        .map(f64::from)
        .collect();

    if points.is_empty() {
        return None;
    }

    let mean = points.iter().sum::<f64>() / points.len() as f64;
    Some(round2(mean))
}

/// Round half away from zero to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Shorthand for [`ScaleAggregator::aggregate`]
pub fn aggregate(encoded: &EncodedResponses) -> Vec<ScaleResult> {
    ScaleAggregator::aggregate(encoded)
}
