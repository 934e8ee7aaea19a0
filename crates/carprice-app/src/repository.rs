//! Adapters opening the infrastructure behind each market

use carprice_domain::service::Estimator;
use carprice_infra::persistence::CsvMarketListingRepository;
use carprice_infra::xgboost::XgbRegressor;
use carprice_types::{Market, Result};

use crate::config::Config;

/// Open the CSV listing repository of a market
pub fn open_market_repo(config: &Config, market: Market) -> CsvMarketListingRepository {
    CsvMarketListingRepository::new(config.dataset_path(market))
}

/// Load the trained estimator of a market
pub fn load_estimator(config: &Config, market: Market) -> Result<Box<dyn Estimator>> {
    let model = XgbRegressor::load(&config.model_path(market))?;
    Ok(Box::new(model))
}
