//! CSV-backed market listing repository
//!
//! Reads a headered UTF-8 CSV exported from the cleaned market data. Columns
//! are located by header name; columns other than the ones below are ignored.

use std::io::Read;
use std::path::PathBuf;

use carprice_domain::model::MarketListing;
use carprice_domain::repository::MarketListingRepository;
use carprice_types::{Error, Result};

use crate::artifact::open_artifact;

const COMPANY: &str = "company";
const NAME: &str = "name";
const FUEL_TYPE: &str = "fuel_type";
const TRANSMISSION: &str = "transmission";
const SELLER_TYPE: &str = "seller_type";
const MILEAGE_KMPL: &str = "mileage_kmpl";
const ENGINE_CC: &str = "engine_cc";
const MAX_POWER_BHP: &str = "max_power_bhp";

/// Positions of the known columns in the header row
struct ColumnIndex {
    company: usize,
    name: usize,
    fuel_type: usize,
    transmission: usize,
    mileage_kmpl: usize,
    engine_cc: usize,
    max_power_bhp: usize,
    seller_type: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let position = |column: &str| headers.iter().position(|h| h == column);
        let required = |column: &str| {
            position(column)
                .ok_or_else(|| Error::Dataset(format!("missing required column '{}'", column)))
        };

        Ok(Self {
            company: required(COMPANY)?,
            name: required(NAME)?,
            fuel_type: required(FUEL_TYPE)?,
            transmission: required(TRANSMISSION)?,
            mileage_kmpl: required(MILEAGE_KMPL)?,
            engine_cc: required(ENGINE_CC)?,
            max_power_bhp: required(MAX_POWER_BHP)?,
            seller_type: position(SELLER_TYPE),
        })
    }
}

/// File-based market listing repository (CSV)
pub struct CsvMarketListingRepository {
    csv_path: PathBuf,
}

impl CsvMarketListingRepository {
    pub fn new(csv_path: PathBuf) -> Self {
        Self { csv_path }
    }

    /// Parse listings from any CSV source
    pub fn read_listings<R: Read>(source: R) -> Result<Vec<MarketListing>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(source);

        let columns = ColumnIndex::from_headers(reader.headers()?)?;

        let mut listings = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            // +2: 0-based index and the header row
            let row_num = row_idx + 2;
            listings.push(parse_record(&record, &columns, row_num)?);
        }

        Ok(listings)
    }
}

impl MarketListingRepository for CsvMarketListingRepository {
    fn find_all(&self) -> Result<Vec<MarketListing>> {
        let file = open_artifact(&self.csv_path)?;
        let listings = Self::read_listings(file)?;
        tracing::debug!(
            path = %self.csv_path.display(),
            rows = listings.len(),
            "read market listings"
        );
        Ok(listings)
    }
}

fn parse_record(
    record: &csv::StringRecord,
    columns: &ColumnIndex,
    row_num: usize,
) -> Result<MarketListing> {
    let text = |idx: usize| record.get(idx).unwrap_or("").to_string();

    Ok(MarketListing {
        company: text(columns.company),
        name: text(columns.name),
        fuel_type: text(columns.fuel_type),
        transmission: text(columns.transmission),
        seller_type: columns
            .seller_type
            .map(text)
            .filter(|s| !s.is_empty()),
        mileage_kmpl: parse_optional_f64(record.get(columns.mileage_kmpl), row_num, MILEAGE_KMPL)?,
        engine_cc: parse_optional_f64(record.get(columns.engine_cc), row_num, ENGINE_CC)?,
        max_power_bhp: parse_optional_f64(record.get(columns.max_power_bhp), row_num, MAX_POWER_BHP)?,
    })
}

/// Blank and `NaN` cells are missing values; anything else must be a number
fn parse_optional_f64(cell: Option<&str>, row: usize, column: &str) -> Result<Option<f64>> {
    let cleaned = cell.unwrap_or("").trim().replace(',', "");
    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }

    cleaned.parse().map(Some).map_err(|_| {
        Error::Dataset(format!(
            "invalid number in row {}, column {}: {}",
            row,
            column,
            cell.unwrap_or("")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DEALER_CSV: &str = "\
company,name,year,selling_price,kms_driven,fuel_type,seller_type,transmission,mileage_kmpl,engine_cc,max_power_bhp,seats
Maruti,Swift,2017,550000,42000,Petrol,Dealer,Manual,21.21,1197,81.8,5
Hyundai,Creta,2019,1250000,30000,Diesel,Trustmark Dealer,Automatic,17.01,1582,126.2,5
Maruti,Alto,2015,250000,61000,Petrol,Dealer,Manual,,796,47.3,5
";

    #[test]
    fn test_read_listings_by_header_name() {
        let listings = CsvMarketListingRepository::read_listings(DEALER_CSV.as_bytes()).unwrap();

        assert_eq!(listings.len(), 3);
        assert_eq!(listings[0].company, "Maruti");
        assert_eq!(listings[0].name, "Swift");
        assert_eq!(listings[1].seller_type.as_deref(), Some("Trustmark Dealer"));
        assert_eq!(listings[1].transmission, "Automatic");
        assert!((listings[1].engine_cc.unwrap() - 1582.0).abs() < 1e-9);
        assert_eq!(listings[2].mileage_kmpl, None);
    }

    #[test]
    fn test_private_dataset_without_seller_type() {
        let csv = "company,name,fuel_type,transmission,mileage_kmpl,engine_cc,max_power_bhp\n\
                   Tata,Nexon,Petrol,Manual,17.4,1198,108.5\n";
        let listings = CsvMarketListingRepository::read_listings(csv.as_bytes()).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].seller_type, None);
    }

    #[test]
    fn test_missing_column_is_dataset_error() {
        let csv = "company,name,fuel_type,transmission,engine_cc,max_power_bhp\n";
        let err = CsvMarketListingRepository::read_listings(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("mileage_kmpl"));
    }

    #[test]
    fn test_invalid_number_names_row_and_column() {
        let csv = "company,name,fuel_type,transmission,mileage_kmpl,engine_cc,max_power_bhp\n\
                   Tata,Nexon,Petrol,Manual,17.4,big,108.5\n";
        let err = CsvMarketListingRepository::read_listings(csv.as_bytes()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("row 2"), "{}", message);
        assert!(message.contains("engine_cc"), "{}", message);
    }

    #[test]
    fn test_parse_optional_f64() {
        assert_eq!(parse_optional_f64(Some(""), 2, "x").unwrap(), None);
        assert_eq!(parse_optional_f64(Some("NaN"), 2, "x").unwrap(), None);
        assert_eq!(parse_optional_f64(Some("1,197"), 2, "x").unwrap(), Some(1197.0));
        assert_eq!(parse_optional_f64(None, 2, "x").unwrap(), None);
    }

    #[test]
    fn test_find_all_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dealer_market_data.csv");
        std::fs::write(&path, DEALER_CSV).unwrap();

        let repo = CsvMarketListingRepository::new(path);
        assert_eq!(repo.find_all().unwrap().len(), 3);
    }

    #[test]
    fn test_find_all_missing_file() {
        let dir = tempdir().unwrap();
        let repo = CsvMarketListingRepository::new(dir.path().join("absent.csv"));
        assert!(matches!(repo.find_all(), Err(Error::DataUnavailable(_))));
    }
}
