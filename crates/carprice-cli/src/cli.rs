//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use carprice_types::{Market, OutputFormat};

#[derive(Parser)]
#[command(name = "carprice")]
#[command(version)]
#[command(about = "Used car price estimation for the Indian market")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the datasets and models. Uses config value if not specified.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate the price of a vehicle
    Predict {
        /// Market to price in. Uses config value if not specified.
        #[arg(long, short = 'm')]
        market: Option<Market>,

        /// Brand (e.g., "Maruti"). Defaults to the first brand.
        #[arg(long, short = 'b')]
        brand: Option<String>,

        /// Model of the brand (e.g., "Swift"). Defaults to the brand's first model.
        #[arg(long)]
        model: Option<String>,

        /// Model year (2000 to current year, default 2018)
        #[arg(long, short = 'y')]
        year: Option<u16>,

        /// Kilometers driven (0 to 300000, default 50000)
        #[arg(long, short = 'k')]
        kms: Option<u32>,

        /// Fuel type (e.g., "Petrol")
        #[arg(long)]
        fuel: Option<String>,

        /// Transmission (e.g., "Manual")
        #[arg(long)]
        transmission: Option<String>,

        /// Seller type, dealer market only (e.g., "Trustmark Dealer")
        #[arg(long)]
        seller_type: Option<String>,

        /// Also print the feature vector sent to the estimator
        #[arg(long)]
        show_features: bool,
    },

    /// List brands of a market
    Brands {
        #[arg(long, short = 'm')]
        market: Option<Market>,
    },

    /// List models of a brand
    Models {
        /// Brand to list models for
        #[arg(long, short = 'b')]
        brand: String,

        #[arg(long, short = 'm')]
        market: Option<Market>,
    },

    /// Show every form choice and slider range of a market
    Options {
        #[arg(long, short = 'm')]
        market: Option<Market>,
    },

    /// Format an amount as Indian rupees
    Format {
        /// Amount in rupees (e.g., 1234567.4)
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set the default market
        #[arg(long)]
        set_market: Option<Market>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_predict() {
        let cli = Cli::try_parse_from([
            "carprice", "predict", "--market", "private", "--brand", "Maruti", "--year", "2016",
            "--kms", "42000", "-f", "json",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Commands::Predict {
                market,
                brand,
                year,
                kms,
                model,
                ..
            } => {
                assert_eq!(market, Some(Market::Private));
                assert_eq!(brand.as_deref(), Some("Maruti"));
                assert_eq!(year, Some(2016));
                assert_eq!(kms, Some(42_000));
                assert_eq!(model, None);
            }
            _ => panic!("expected predict"),
        }
    }

    #[test]
    fn test_parse_negative_amount() {
        let cli = Cli::try_parse_from(["carprice", "format", "-1234567"]).unwrap();
        match cli.command {
            Commands::Format { amount } => assert!((amount + 1_234_567.0).abs() < 1e-9),
            _ => panic!("expected format"),
        }
    }

    #[test]
    fn test_models_requires_brand() {
        assert!(Cli::try_parse_from(["carprice", "models"]).is_err());
    }

    #[test]
    fn test_global_data_dir_after_subcommand() {
        let cli = Cli::try_parse_from(["carprice", "brands", "--data-dir", "/srv/cars", "-v"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/srv/cars")));
        assert!(cli.verbose);
    }
}
