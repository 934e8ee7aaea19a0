//! Named feature vectors and the one-hot column encoding

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

pub const YEAR: &str = "year";
pub const KMS_DRIVEN: &str = "kms_driven";
pub const MILEAGE_KMPL: &str = "mileage_kmpl";
pub const ENGINE_CC: &str = "engine_cc";
pub const MAX_POWER_BHP: &str = "max_power_bhp";
pub const SEATS: &str = "seats";

/// Categorical field that is one-hot encoded into indicator columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    Company,
    Model,
    FuelType,
    Transmission,
    SellerType,
}

impl CategoryKind {
    /// Column prefix used when the estimator was trained
    pub fn prefix(&self) -> &'static str {
        match self {
            CategoryKind::Company => "company",
            CategoryKind::Model => "name",
            CategoryKind::FuelType => "fuel_type",
            CategoryKind::Transmission => "transmission",
            CategoryKind::SellerType => "seller_type",
        }
    }

    /// Indicator column name for `value`, e.g. `company_Maruti`
    pub fn encode(&self, value: &str) -> String {
        format!("{}_{}", self.prefix(), value)
    }
}

/// Ordered mapping from feature name to value.
///
/// Insertion order is preserved; inserting an existing name replaces its value
/// in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    entries: Vec<(String, f64)>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Append without checking for an existing entry
    pub(crate) fn push(&mut self, name: String, value: f64) {
        self.entries.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Values in feature order, ready to hand to an estimator
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Name lookup table for alignment against another schema
    pub(crate) fn as_lookup(&self) -> HashMap<&str, f64> {
        self.iter().collect()
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
