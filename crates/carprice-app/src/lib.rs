//! Application service layer - config, context loading, prediction use case

pub mod app;
pub mod config;
pub mod constants;
pub mod context;
pub mod repository;
