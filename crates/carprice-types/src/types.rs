//! Shared value types used across the workspace

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Which market a price is estimated for.
///
/// Each market has its own listings dataset and its own trained estimator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    /// Dealer listings; selections carry a seller type
    #[default]
    Dealer,
    /// Private-seller listings
    Private,
}

impl Market {
    pub const ALL: [Market; 2] = [Market::Dealer, Market::Private];

    /// Human-readable label of the estimated value
    pub fn label(&self) -> &'static str {
        match self {
            Market::Dealer => "Dealer Market Value",
            Market::Private => "Private Seller Price",
        }
    }

    /// Whether selections in this market include a seller type
    pub fn uses_seller_type(&self) -> bool {
        matches!(self, Market::Dealer)
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Market::Dealer => write!(f, "dealer"),
            Market::Private => write!(f, "private"),
        }
    }
}
