//! User selections submitted for a price estimate

use serde::{Deserialize, Serialize};

use super::feature_vector::CategoryKind;

/// Vehicle details picked by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSelection {
    pub brand: String,
    pub model: String,
    pub year: u16,
    pub kms_driven: u32,
    pub fuel_type: String,
    pub transmission: String,
    /// Dealer market only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_type: Option<String>,
}

impl VehicleSelection {
    /// Categorical values of this selection tagged with their kind
    pub fn categories(&self) -> Vec<(CategoryKind, &str)> {
        let mut categories = vec![
            (CategoryKind::Company, self.brand.as_str()),
            (CategoryKind::Model, self.model.as_str()),
            (CategoryKind::FuelType, self.fuel_type.as_str()),
            (CategoryKind::Transmission, self.transmission.as_str()),
        ];
        if let Some(ref seller_type) = self.seller_type {
            categories.push((CategoryKind::SellerType, seller_type.as_str()));
        }
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swift() -> VehicleSelection {
        VehicleSelection {
            brand: "Maruti".to_string(),
            model: "Swift".to_string(),
            year: 2018,
            kms_driven: 50_000,
            fuel_type: "Petrol".to_string(),
            transmission: "Manual".to_string(),
            seller_type: None,
        }
    }

    #[test]
    fn test_categories_without_seller_type() {
        let selection = swift();
        let kinds: Vec<CategoryKind> = selection.categories().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                CategoryKind::Company,
                CategoryKind::Model,
                CategoryKind::FuelType,
                CategoryKind::Transmission,
            ]
        );
    }

    #[test]
    fn test_categories_with_seller_type() {
        let mut selection = swift();
        selection.seller_type = Some("Dealer".to_string());
        let categories = selection.categories();
        assert_eq!(categories.len(), 5);
        assert_eq!(categories[4], (CategoryKind::SellerType, "Dealer"));
    }
}
