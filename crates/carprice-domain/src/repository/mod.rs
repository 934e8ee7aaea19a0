//! Repository trait definitions for market data

use carprice_types::Error;

use crate::model::MarketListing;

/// Source of historical listings for one market
pub trait MarketListingRepository {
    /// Load every listing
    fn find_all(&self) -> Result<Vec<MarketListing>, Error>;
}
