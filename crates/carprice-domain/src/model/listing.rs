//! Market listing type definitions

use serde::{Deserialize, Serialize};

/// One historical listing row of a market dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketListing {
    /// Brand (e.g., "Maruti")
    pub company: String,
    /// Model name (e.g., "Swift")
    pub name: String,
    pub fuel_type: String,
    pub transmission: String,
    /// Only present in dealer listings
    pub seller_type: Option<String>,
    pub mileage_kmpl: Option<f64>,
    pub engine_cc: Option<f64>,
    pub max_power_bhp: Option<f64>,
}
