//! Feature/target extraction: a fixed 4-wide feature vector and a scalar
//! target per joined record, in sales order.

use crate::normalize::NormalizedRecord;

pub const FEATURE_WIDTH: usize = 4;

/// Fixed feature keys, in vector order. Missing keys default to 0.
pub const FEATURE_KEYS: [&str; FEATURE_WIDTH] =
    ["Quantity Sold", "Stock Level", "Quantity_x", "Quantity_y"];

/// The target duplicates the `Quantity_x` input feature; the model is fit to
/// approximately reproduce one of its own inputs.
pub const TARGET_KEY: &str = "Quantity_x";

pub type FeatureVector = [f64; FEATURE_WIDTH];

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    pub input: FeatureVector,
    pub target: f64,
}

pub fn build_example(record: &NormalizedRecord) -> TrainingExample {
    let mut input = [0.0; FEATURE_WIDTH];
    for (slot, key) in input.iter_mut().zip(FEATURE_KEYS) {
        *slot = record.get(key).copied().unwrap_or(0.0);
    }
    TrainingExample {
        input,
        target: record.get(TARGET_KEY).copied().unwrap_or(0.0),
    }
}

/// One example per normalized record, order preserved.
pub fn build_examples(records: &[NormalizedRecord]) -> Vec<TrainingExample> {
    records.iter().map(build_example).collect()
}
