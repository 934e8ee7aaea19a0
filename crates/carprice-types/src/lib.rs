//! Core types for car price estimation

mod error;
mod types;

pub use error::*;
pub use types::*;
