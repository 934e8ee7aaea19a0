//! Form choices derived from a market dataset
//!
//! The GUI offers exactly these values in its dropdowns and sliders. The CLI
//! accepts free text, so its selections are checked against the same choices.

use std::collections::BTreeMap;

use serde::Serialize;

use carprice_domain::model::{MarketDataset, SpecMedians, VehicleSelection};
use carprice_types::{Error, Market, Result};

use crate::constants::{
    DEFAULT_KMS, DEFAULT_SELLER_TYPES, DEFAULT_YEAR, KMS_MAX, KMS_MIN, KMS_STEP, YEAR_MIN,
};

/// Everything a user may pick for one market
#[derive(Debug, Clone, Serialize)]
pub struct MarketChoices {
    pub market: Market,
    pub brands: Vec<String>,
    /// Sorted models per brand
    pub models: BTreeMap<String, Vec<String>>,
    pub fuel_types: Vec<String>,
    pub transmissions: Vec<String>,
    /// Empty for markets without a seller type
    pub seller_types: Vec<String>,
    pub year_min: u16,
    pub year_max: u16,
    pub default_year: u16,
    pub kms_min: u32,
    pub kms_max: u32,
    pub kms_step: u32,
    pub default_kms: u32,
    /// Values used for the specs the form does not ask for
    pub medians: SpecMedians,
}

impl MarketChoices {
    pub fn from_dataset(market: Market, dataset: &MarketDataset, current_year: u16) -> Self {
        let brands = dataset.brands();
        let models = brands
            .iter()
            .map(|b| (b.clone(), dataset.models_for(b)))
            .collect();

        let seller_types: Vec<String> = if market.uses_seller_type() {
            DEFAULT_SELLER_TYPES.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        };
        let unoffered: Vec<String> = dataset
            .seller_types()
            .into_iter()
            .filter(|s| !seller_types.contains(s))
            .collect();
        if market.uses_seller_type() && !unoffered.is_empty() {
            tracing::debug!(%market, seller_types = ?unoffered, "dataset seller types not offered");
        }

        let year_max = current_year.max(YEAR_MIN);

        Self {
            market,
            brands,
            models,
            fuel_types: dataset.fuel_types(),
            transmissions: dataset.transmissions(),
            seller_types,
            year_min: YEAR_MIN,
            year_max,
            default_year: DEFAULT_YEAR.clamp(YEAR_MIN, year_max),
            kms_min: KMS_MIN,
            kms_max: KMS_MAX,
            kms_step: KMS_STEP,
            default_kms: DEFAULT_KMS,
            medians: *dataset.medians(),
        }
    }

    /// Models of `brand`; empty for an unknown brand
    pub fn models_for(&self, brand: &str) -> &[String] {
        self.models.get(brand).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check that every field of `selection` is one of the offered choices
    pub fn validate(&self, selection: &VehicleSelection) -> Result<()> {
        if !self.brands.contains(&selection.brand) {
            return Err(self.invalid(format!("unknown brand '{}'", selection.brand)));
        }
        if !self.models_for(&selection.brand).contains(&selection.model) {
            return Err(self.invalid(format!(
                "model '{}' is not listed under brand '{}'",
                selection.model, selection.brand
            )));
        }
        if !self.fuel_types.contains(&selection.fuel_type) {
            return Err(self.invalid(format!("unknown fuel type '{}'", selection.fuel_type)));
        }
        if !self.transmissions.contains(&selection.transmission) {
            return Err(self.invalid(format!(
                "unknown transmission '{}'",
                selection.transmission
            )));
        }
        if selection.year < self.year_min || selection.year > self.year_max {
            return Err(self.invalid(format!(
                "year {} outside {}..={}",
                selection.year, self.year_min, self.year_max
            )));
        }
        if selection.kms_driven < self.kms_min || selection.kms_driven > self.kms_max {
            return Err(self.invalid(format!(
                "kilometers driven {} outside {}..={}",
                selection.kms_driven, self.kms_min, self.kms_max
            )));
        }

        match (&selection.seller_type, self.market.uses_seller_type()) {
            (Some(seller), true) if !self.seller_types.contains(seller) => {
                Err(self.invalid(format!("unknown seller type '{}'", seller)))
            }
            (None, true) => Err(self.invalid("a seller type is required".to_string())),
            (Some(_), false) => Err(self.invalid("this market has no seller type".to_string())),
            _ => Ok(()),
        }
    }

    /// Fill unset fields with the initial value of each dropdown/slider and
    /// validate the result
    pub fn complete(&self, draft: SelectionDraft) -> Result<VehicleSelection> {
        let brand = match draft.brand {
            Some(brand) => brand,
            None => first(&self.brands, "brands")?,
        };
        if !self.brands.contains(&brand) {
            return Err(self.invalid(format!("unknown brand '{}'", brand)));
        }

        let model = match draft.model {
            Some(model) => model,
            None => first(self.models_for(&brand), "models")?,
        };
        let fuel_type = match draft.fuel_type {
            Some(fuel) => fuel,
            None => first(&self.fuel_types, "fuel types")?,
        };
        let transmission = match draft.transmission {
            Some(transmission) => transmission,
            None => first(&self.transmissions, "transmissions")?,
        };

        let seller_type = if self.market.uses_seller_type() {
            match draft.seller_type {
                Some(seller) => Some(seller),
                None => Some(first(&self.seller_types, "seller types")?),
            }
        } else {
            if let Some(ref seller) = draft.seller_type {
                tracing::warn!(seller_type = %seller, market = %self.market, "seller type ignored");
            }
            None
        };

        let selection = VehicleSelection {
            brand,
            model,
            year: draft.year.unwrap_or(self.default_year),
            kms_driven: draft.kms_driven.unwrap_or(self.default_kms),
            fuel_type,
            transmission,
            seller_type,
        };
        self.validate(&selection)?;
        Ok(selection)
    }

    fn invalid(&self, message: String) -> Error {
        Error::InvalidSelection(format!("{} ({} market)", message, self.market))
    }
}

fn first(list: &[String], what: &str) -> Result<String> {
    list.first()
        .cloned()
        .ok_or_else(|| Error::InvalidSelection(format!("no {} available", what)))
}

/// Partially filled selection, e.g. from command-line flags
#[derive(Debug, Clone, Default)]
pub struct SelectionDraft {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<u16>,
    pub kms_driven: Option<u32>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub seller_type: Option<String>,
}

impl SelectionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_kms_driven(mut self, kms: u32) -> Self {
        self.kms_driven = Some(kms);
        self
    }

    pub fn with_fuel_type(mut self, fuel_type: impl Into<String>) -> Self {
        self.fuel_type = Some(fuel_type.into());
        self
    }

    pub fn with_transmission(mut self, transmission: impl Into<String>) -> Self {
        self.transmission = Some(transmission.into());
        self
    }

    pub fn with_seller_type(mut self, seller_type: impl Into<String>) -> Self {
        self.seller_type = Some(seller_type.into());
        self
    }
}
