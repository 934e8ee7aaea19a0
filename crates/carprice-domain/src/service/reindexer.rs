//! Alignment of a sparse feature vector to an estimator's schema

use crate::model::FeatureVector;

/// Align `vector` to `expected_names`.
///
/// The result holds exactly the expected names in their order. Names present
/// in `vector` keep their value, missing ones are 0, and names the schema does
/// not know are dropped.
pub fn reindex(vector: &FeatureVector, expected_names: &[String]) -> FeatureVector {
    let lookup = vector.as_lookup();
    let mut aligned = FeatureVector::with_capacity(expected_names.len());
    for name in expected_names {
        let value = lookup.get(name.as_str()).copied().unwrap_or(0.0);
        aligned.push(name.clone(), value);
    }
    aligned
}

/// Names in `vector` that `expected_names` does not contain, i.e. the
/// entries `reindex` would drop
pub fn unmatched_features<'a>(vector: &'a FeatureVector, expected_names: &[String]) -> Vec<&'a str> {
    vector
        .names()
        .filter(|name| !expected_names.iter().any(|e| e.as_str() == *name))
        .collect()
}
