//! Feature vector construction from user selections

use crate::model::feature_vector::{
    ENGINE_CC, KMS_DRIVEN, MAX_POWER_BHP, MILEAGE_KMPL, SEATS, YEAR,
};
use crate::model::{FeatureVector, SpecMedians, VehicleSelection};

/// Seat count assumed for every request
pub const DEFAULT_SEATS: f64 = 5.0;

/// Build the sparse feature vector for one request.
///
/// Year and distance pass through, the numeric specs the user does not enter
/// take the dataset-wide medians, and every categorical selection sets its
/// indicator column to 1.
pub fn build_feature_vector(selection: &VehicleSelection, medians: &SpecMedians) -> FeatureVector {
    let categories = selection.categories();
    let mut vector = FeatureVector::with_capacity(6 + categories.len());

    vector.insert(YEAR, f64::from(selection.year));
    vector.insert(KMS_DRIVEN, f64::from(selection.kms_driven));
    vector.insert(MILEAGE_KMPL, medians.mileage_kmpl);
    vector.insert(ENGINE_CC, medians.engine_cc);
    vector.insert(MAX_POWER_BHP, medians.max_power_bhp);
    vector.insert(SEATS, DEFAULT_SEATS);

    for (kind, value) in categories {
        vector.insert(kind.encode(value), 1.0);
    }

    vector
}
