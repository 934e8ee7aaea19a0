//! Domain services

pub mod currency;
pub mod estimator;
pub mod feature_builder;
pub mod pricing;
pub mod reindexer;

pub use currency::{format_currency, format_rupees, group_indian, group_thousands};
pub use estimator::{predict, Estimator};
pub use feature_builder::{build_feature_vector, DEFAULT_SEATS};
pub use pricing::{estimate_price, price_breakdown, PriceBreakdown};
pub use reindexer::{reindex, unmatched_features};
