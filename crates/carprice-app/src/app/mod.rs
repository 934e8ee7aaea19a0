//! Application use cases

pub mod choices;
pub mod prediction_service;

pub use choices::{MarketChoices, SelectionDraft};
pub use prediction_service::{estimate, estimate_with_breakdown, PriceEstimate};
