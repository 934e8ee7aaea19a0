//! Infrastructure layer - dataset repositories and estimator loaders

pub mod artifact;
pub mod persistence;
pub mod xgboost;
