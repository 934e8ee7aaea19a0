//! Command handlers

use std::path::PathBuf;

use carprice_app::app::{estimate_with_breakdown, SelectionDraft};
use carprice_app::config::Config;
use carprice_app::context::AppContext;
use carprice_domain::service::format_currency;
use carprice_types::{Market, OutputFormat, Result};

use crate::cli::{Cli, Commands};
use crate::output::{output_choices, output_estimate, output_features, output_list};

pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref data_dir) = cli.data_dir {
        config.data_dir = Some(data_dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Predict {
            market,
            brand,
            model,
            year,
            kms,
            fuel,
            transmission,
            seller_type,
            show_features,
        } => {
            let draft = SelectionDraft {
                brand: brand.clone(),
                model: model.clone(),
                year: *year,
                kms_driven: *kms,
                fuel_type: fuel.clone(),
                transmission: transmission.clone(),
                seller_type: seller_type.clone(),
            };
            cmd_predict(
                &config,
                market.unwrap_or(config.default_market),
                draft,
                *show_features,
                output_format,
            )
        }
        Commands::Brands { market } => {
            cmd_brands(&config, market.unwrap_or(config.default_market), output_format)
        }
        Commands::Models { brand, market } => cmd_models(
            &config,
            market.unwrap_or(config.default_market),
            brand,
            output_format,
        ),
        Commands::Options { market } => {
            cmd_options(&config, market.unwrap_or(config.default_market), output_format)
        }
        Commands::Format { amount } => cmd_format(*amount, output_format),
        Commands::Config {
            show,
            set_data_dir,
            set_market,
            set_output,
            reset,
        } => cmd_config(
            *show,
            set_data_dir.clone(),
            *set_market,
            *set_output,
            *reset,
        ),
    }
}

fn cmd_predict(
    config: &Config,
    market: Market,
    draft: SelectionDraft,
    show_features: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let app = AppContext::load(config)?;
    let context = app.market(market);

    let selection = context.choices().complete(draft)?;
    let (estimate, breakdown) = estimate_with_breakdown(context, &selection)?;

    output_estimate(output_format, &estimate)?;
    if show_features {
        output_features(output_format, &breakdown)?;
    }
    Ok(())
}

fn cmd_brands(config: &Config, market: Market, output_format: OutputFormat) -> Result<()> {
    let app = AppContext::load(config)?;
    let choices = app.market(market).choices();
    output_list(output_format, &format!("Brands ({})", market.label()), &choices.brands)
}

fn cmd_models(
    config: &Config,
    market: Market,
    brand: &str,
    output_format: OutputFormat,
) -> Result<()> {
    let app = AppContext::load(config)?;
    let choices = app.market(market).choices();

    let models = choices.models_for(brand);
    if models.is_empty() {
        eprintln!("No models found for brand '{}' in the {} market", brand, market);
    }
    output_list(output_format, &format!("{} models", brand), models)
}

fn cmd_options(config: &Config, market: Market, output_format: OutputFormat) -> Result<()> {
    let app = AppContext::load(config)?;
    output_choices(output_format, app.market(market).choices())
}

fn cmd_format(amount: f64, output_format: OutputFormat) -> Result<()> {
    let formatted = format_currency(amount);
    if output_format == OutputFormat::Json {
        let value = serde_json::json!({ "amount": amount, "formatted": formatted });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", formatted);
    }
    Ok(())
}

fn cmd_config(
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_market: Option<Market>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(data_dir) = set_data_dir {
        config.data_dir = Some(data_dir);
        modified = true;
    }

    if let Some(market) = set_market {
        config.default_market = market;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration saved");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
