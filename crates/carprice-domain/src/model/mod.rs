//! Domain model types

pub mod feature_vector;
pub mod listing;
pub mod market_dataset;
pub mod selection;

pub use feature_vector::{CategoryKind, FeatureVector};
pub use listing::MarketListing;
pub use market_dataset::{median, MarketDataset, SpecMedians};
pub use selection::VehicleSelection;
