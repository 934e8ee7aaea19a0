//! Prediction Service - price estimate for one vehicle selection
//!
//! 1. Check the selection against the market's form choices
//! 2. Build, align and predict through the domain pipeline
//! 3. Reject non-finite output
//! 4. Format the amount as rupees

use serde::Serialize;

use carprice_domain::model::VehicleSelection;
use carprice_domain::service::{format_currency, price_breakdown, PriceBreakdown};
use carprice_types::{Error, Market, Result};

use crate::context::MarketContext;

/// Price estimate ready for display
#[derive(Debug, Clone, Serialize)]
pub struct PriceEstimate {
    pub market: Market,
    /// e.g. "Dealer Market Value"
    pub label: String,
    pub selection: VehicleSelection,
    pub amount: f64,
    /// e.g. "₹ 5,45,678"
    pub formatted: String,
}

/// Estimate the price of `selection` in the context's market
pub fn estimate(context: &MarketContext, selection: &VehicleSelection) -> Result<PriceEstimate> {
    estimate_with_breakdown(context, selection).map(|(estimate, _)| estimate)
}

/// Same as [`estimate`], also returning the feature vectors used
pub fn estimate_with_breakdown(
    context: &MarketContext,
    selection: &VehicleSelection,
) -> Result<(PriceEstimate, PriceBreakdown)> {
    let market = context.market();
    context.choices().validate(selection)?;

    let breakdown = price_breakdown(selection, context.dataset().medians(), context.estimator());
    if !breakdown.unmatched.is_empty() {
        tracing::debug!(
            unmatched = ?breakdown.unmatched,
            "features unknown to the estimator were dropped"
        );
    }

    if !breakdown.amount.is_finite() {
        return Err(Error::InvalidPrediction(breakdown.amount));
    }

    let formatted = format_currency(breakdown.amount);
    tracing::info!(%market, amount = breakdown.amount, %formatted, "price estimated");

    let estimate = PriceEstimate {
        market,
        label: market.label().to_string(),
        selection: selection.clone(),
        amount: breakdown.amount,
        formatted,
    };
    Ok((estimate, breakdown))
}
