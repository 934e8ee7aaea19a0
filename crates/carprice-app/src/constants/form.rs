//! Ranges and defaults of the estimation form

use chrono::Datelike;

/// Oldest selectable model year
pub const YEAR_MIN: u16 = 2000;
pub const DEFAULT_YEAR: u16 = 2018;

pub const KMS_MIN: u32 = 0;
pub const KMS_MAX: u32 = 300_000;
pub const KMS_STEP: u32 = 1_000;
pub const DEFAULT_KMS: u32 = 50_000;

/// Seller types offered in the dealer market
pub const DEFAULT_SELLER_TYPES: [&str; 2] = ["Dealer", "Trustmark Dealer"];

pub const ESTIMATE_DISCLAIMER: &str = "This is an estimate based on market data for similar vehicles. \
Actual prices may vary based on vehicle condition and negotiations.";

/// Newest selectable model year
pub fn current_year() -> u16 {
    u16::try_from(chrono::Local::now().year()).unwrap_or(u16::MAX)
}
