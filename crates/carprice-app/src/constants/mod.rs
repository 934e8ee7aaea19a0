//! Constants for the estimation form and its artifacts

pub mod artifacts;
pub mod form;

pub use artifacts::{
    DEALER_DATASET_FILE, DEALER_MODEL_FILE, PRIVATE_DATASET_FILE, PRIVATE_MODEL_FILE,
};
pub use form::{
    current_year, DEFAULT_KMS, DEFAULT_SELLER_TYPES, DEFAULT_YEAR, ESTIMATE_DISCLAIMER, KMS_MAX,
    KMS_MIN, KMS_STEP, YEAR_MIN,
};
