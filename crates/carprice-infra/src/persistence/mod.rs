//! Persistence implementations
//!
//! File-based implementations of the domain repository traits.

mod csv_market_listing_repo;

pub use csv_market_listing_repo::CsvMarketListingRepository;
