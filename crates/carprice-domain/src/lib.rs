//! Domain layer for car price estimation
//!
//! Holds the market listing models, the pure pricing pipeline (feature
//! encoding, reindexing, estimator invocation, currency formatting) and the
//! repository traits implemented by the infrastructure crate.

pub mod model;
pub mod repository;
pub mod service;
