//! Immutable market dataset with derived lookups
//!
//! Built once from the listings of one market. Everything derived from the
//! listings (brand index, spec medians) is computed at construction and never
//! changes afterwards.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use carprice_types::{Error, Result};

use super::listing::MarketListing;

/// Dataset-wide medians of the numeric specs the user does not enter
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpecMedians {
    pub mileage_kmpl: f64,
    pub engine_cc: f64,
    pub max_power_bhp: f64,
}

/// Listings of one market plus the brand→models index derived from them
#[derive(Debug, Clone)]
pub struct MarketDataset {
    listings: Vec<MarketListing>,
    /// Brand to distinct model names, in first-appearance order
    brand_index: BTreeMap<String, Vec<String>>,
    medians: SpecMedians,
}

impl MarketDataset {
    /// Build the dataset and its derived lookups.
    ///
    /// Fails when there are no listings or when a numeric spec column has no
    /// values at all, since no median could stand in for it.
    pub fn from_listings(listings: Vec<MarketListing>) -> Result<Self> {
        if listings.is_empty() {
            return Err(Error::Dataset("dataset has no listings".to_string()));
        }

        let medians = SpecMedians {
            mileage_kmpl: column_median(&listings, "mileage_kmpl", |l| l.mileage_kmpl)?,
            engine_cc: column_median(&listings, "engine_cc", |l| l.engine_cc)?,
            max_power_bhp: column_median(&listings, "max_power_bhp", |l| l.max_power_bhp)?,
        };

        let mut brand_index: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for listing in &listings {
            if listing.company.is_empty() || listing.name.is_empty() {
                continue;
            }
            let models = brand_index.entry(listing.company.clone()).or_default();
            if !models.contains(&listing.name) {
                models.push(listing.name.clone());
            }
        }

        Ok(Self {
            listings,
            brand_index,
            medians,
        })
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn medians(&self) -> &SpecMedians {
        &self.medians
    }

    pub fn brand_index(&self) -> &BTreeMap<String, Vec<String>> {
        &self.brand_index
    }

    /// Brands, sorted
    pub fn brands(&self) -> Vec<String> {
        self.brand_index.keys().cloned().collect()
    }

    /// Models sold under `brand`, sorted. Empty for an unknown brand.
    pub fn models_for(&self, brand: &str) -> Vec<String> {
        let mut models = self.brand_index.get(brand).cloned().unwrap_or_default();
        models.sort();
        models
    }

    pub fn fuel_types(&self) -> Vec<String> {
        self.distinct(|l| Some(l.fuel_type.as_str()))
    }

    pub fn transmissions(&self) -> Vec<String> {
        self.distinct(|l| Some(l.transmission.as_str()))
    }

    /// Distinct seller types found in the listings. Empty when the dataset has
    /// no seller type column.
    pub fn seller_types(&self) -> Vec<String> {
        self.distinct(|l| l.seller_type.as_deref())
    }

    fn distinct<'a, F>(&'a self, field: F) -> Vec<String>
    where
        F: Fn(&'a MarketListing) -> Option<&'a str>,
    {
        self.listings
            .iter()
            .filter_map(field)
            .filter(|v| !v.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

fn column_median<F>(listings: &[MarketListing], column: &str, field: F) -> Result<f64>
where
    F: Fn(&MarketListing) -> Option<f64>,
{
    median(listings.iter().filter_map(field))
        .ok_or_else(|| Error::Dataset(format!("column '{}' has no values", column)))
}

/// Median of the finite values; the mean of the two middle values for an even
/// count. `None` when there are no finite values.
pub fn median<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(company: &str, name: &str, fuel: &str, mileage: Option<f64>) -> MarketListing {
        MarketListing {
            company: company.to_string(),
            name: name.to_string(),
            fuel_type: fuel.to_string(),
            transmission: "Manual".to_string(),
            seller_type: None,
            mileage_kmpl: mileage,
            engine_cc: Some(1197.0),
            max_power_bhp: Some(82.0),
        }
    }

    fn sample_dataset() -> MarketDataset {
        MarketDataset::from_listings(vec![
            listing("Maruti", "Swift", "Petrol", Some(21.0)),
            listing("Hyundai", "i20", "Diesel", Some(18.0)),
            listing("Maruti", "Alto", "Petrol", None),
            listing("Maruti", "Swift", "CNG", Some(24.0)),
            listing("Hyundai", "Creta", "Diesel", Some(17.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(vec![3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(Vec::<f64>::new()), None);
    }

    #[test]
    fn test_median_skips_non_finite() {
        assert_eq!(median(vec![f64::NAN, 5.0, 1.0]), Some(3.0));
    }

    #[test]
    fn test_medians_skip_blank_cells() {
        let dataset = sample_dataset();
        // 17, 18, 21, 24 -> (18 + 21) / 2
        assert!((dataset.medians().mileage_kmpl - 19.5).abs() < 1e-9);
        assert!((dataset.medians().engine_cc - 1197.0).abs() < 1e-9);
    }

    #[test]
    fn test_brand_index_first_appearance_order() {
        let dataset = sample_dataset();
        assert_eq!(
            dataset.brand_index().get("Maruti").unwrap(),
            &vec!["Swift".to_string(), "Alto".to_string()]
        );
        assert_eq!(dataset.brands(), vec!["Hyundai", "Maruti"]);
    }

    #[test]
    fn test_models_for_sorted() {
        let dataset = sample_dataset();
        assert_eq!(dataset.models_for("Maruti"), vec!["Alto", "Swift"]);
        assert_eq!(dataset.models_for("Hyundai"), vec!["Creta", "i20"]);
        assert!(dataset.models_for("Tata").is_empty());
    }

    #[test]
    fn test_distinct_choices_sorted() {
        let dataset = sample_dataset();
        assert_eq!(dataset.fuel_types(), vec!["CNG", "Diesel", "Petrol"]);
        assert_eq!(dataset.transmissions(), vec!["Manual"]);
        assert!(dataset.seller_types().is_empty());
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let err = MarketDataset::from_listings(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }

    #[test]
    fn test_column_without_values_rejected() {
        let err = MarketDataset::from_listings(vec![listing("Maruti", "Swift", "Petrol", None)])
            .unwrap_err();
        assert!(err.to_string().contains("mileage_kmpl"));
    }
}
