//! Selection-to-price pipeline

use serde::Serialize;

use crate::model::{FeatureVector, SpecMedians, VehicleSelection};

use super::estimator::{predict, Estimator};
use super::feature_builder::build_feature_vector;
use super::reindexer::{reindex, unmatched_features};

/// Intermediate values of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PriceBreakdown {
    /// Sparse vector built from the selection
    pub built: FeatureVector,
    /// Built names the estimator does not know (dropped by reindexing)
    pub unmatched: Vec<String>,
    /// Vector aligned to the estimator schema
    pub aligned: FeatureVector,
    pub amount: f64,
}

/// Build, align and predict, keeping the intermediate vectors
pub fn price_breakdown(
    selection: &VehicleSelection,
    medians: &SpecMedians,
    estimator: &dyn Estimator,
) -> PriceBreakdown {
    let expected = estimator.expected_feature_names();
    let built = build_feature_vector(selection, medians);
    let unmatched = unmatched_features(&built, expected)
        .into_iter()
        .map(str::to_string)
        .collect();
    let aligned = reindex(&built, expected);
    let amount = predict(&aligned, estimator);

    PriceBreakdown {
        built,
        unmatched,
        aligned,
        amount,
    }
}

/// Estimated price for `selection`
pub fn estimate_price(
    selection: &VehicleSelection,
    medians: &SpecMedians,
    estimator: &dyn Estimator,
) -> f64 {
    price_breakdown(selection, medians, estimator).amount
}
