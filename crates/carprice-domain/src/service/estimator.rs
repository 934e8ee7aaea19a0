//! Estimator capability and the adapter that invokes it

use crate::model::FeatureVector;

/// A trained regression model consumed as a black box.
///
/// Implementations are immutable once loaded and are shared read-only for the
/// lifetime of the process.
pub trait Estimator: Send + Sync {
    /// Feature names the model was trained on, in input order
    fn expected_feature_names(&self) -> &[String];

    /// Predict a price for one sample laid out as `expected_feature_names`
    fn predict(&self, features: &[f64]) -> f64;
}

/// Run `estimator` on a vector already aligned to its schema.
///
/// Passing a vector of the wrong width is a programming error.
pub fn predict(vector: &FeatureVector, estimator: &dyn Estimator) -> f64 {
    debug_assert!(
        vector
            .names()
            .eq(estimator.expected_feature_names().iter().map(String::as_str)),
        "feature vector is not aligned to the estimator schema"
    );
    estimator.predict(&vector.values())
}
