//! Default artifact file names inside the data directory

pub const DEALER_DATASET_FILE: &str = "dealer_market_data.csv";
pub const PRIVATE_DATASET_FILE: &str = "private_market_data.csv";
pub const DEALER_MODEL_FILE: &str = "cardekho_dealer_model.json";
pub const PRIVATE_MODEL_FILE: &str = "private_seller_model.json";
