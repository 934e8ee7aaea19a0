//! Load-once application context
//!
//! Datasets and estimators are loaded a single time at startup and then only
//! borrowed. Nothing here is mutated after construction.

use carprice_domain::model::MarketDataset;
use carprice_domain::repository::MarketListingRepository;
use carprice_domain::service::Estimator;
use carprice_types::{Error, Market, Result};

use crate::app::MarketChoices;
use crate::config::Config;
use crate::constants::current_year;
use crate::repository::{load_estimator, open_market_repo};

/// Dataset and estimator of one market
pub struct MarketContext {
    market: Market,
    dataset: MarketDataset,
    estimator: Box<dyn Estimator>,
    choices: MarketChoices,
}

impl MarketContext {
    pub fn new(market: Market, dataset: MarketDataset, estimator: Box<dyn Estimator>) -> Self {
        let choices = MarketChoices::from_dataset(market, &dataset, current_year());
        Self {
            market,
            dataset,
            estimator,
            choices,
        }
    }

    /// Load the artifacts of `market` as configured
    pub fn load(config: &Config, market: Market) -> Result<Self> {
        let listings = open_market_repo(config, market).find_all()?;
        let dataset = MarketDataset::from_listings(listings)?;
        let estimator = load_estimator(config, market)?;

        tracing::info!(
            %market,
            listings = dataset.len(),
            brands = dataset.brand_index().len(),
            features = estimator.expected_feature_names().len(),
            "market loaded"
        );

        Ok(Self::new(market, dataset, estimator))
    }

    pub fn market(&self) -> Market {
        self.market
    }

    pub fn dataset(&self) -> &MarketDataset {
        &self.dataset
    }

    pub fn estimator(&self) -> &dyn Estimator {
        self.estimator.as_ref()
    }

    /// Dropdown and slider choices derived from the dataset
    pub fn choices(&self) -> &MarketChoices {
        &self.choices
    }
}

/// Both markets, ready for predictions
pub struct AppContext {
    dealer: MarketContext,
    private: MarketContext,
}

impl AppContext {
    pub fn new(dealer: MarketContext, private: MarketContext) -> Self {
        Self { dealer, private }
    }

    /// Load every artifact.
    ///
    /// All artifacts must be present; the missing ones are reported together
    /// as [`Error::DataUnavailable`].
    pub fn load(config: &Config) -> Result<Self> {
        let missing: Vec<String> = config
            .artifact_paths()
            .into_iter()
            .filter(|p| !p.exists())
            .map(|p| p.display().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::DataUnavailable(missing.join(", ")));
        }

        Ok(Self::new(
            MarketContext::load(config, Market::Dealer)?,
            MarketContext::load(config, Market::Private)?,
        ))
    }

    pub fn market(&self, market: Market) -> &MarketContext {
        match market {
            Market::Dealer => &self.dealer,
            Market::Private => &self.private,
        }
    }
}
