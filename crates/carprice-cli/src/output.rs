//! Output formatting module

use carprice_app::app::{MarketChoices, PriceEstimate};
use carprice_app::constants::ESTIMATE_DISCLAIMER;
use carprice_domain::service::{group_thousands, PriceBreakdown};
use carprice_types::{OutputFormat, Result};

pub fn output_estimate(output_format: OutputFormat, estimate: &PriceEstimate) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(estimate)?;
        println!("{}", content);
        return Ok(());
    }

    let selection = &estimate.selection;
    let title = format!("Estimated {}", estimate.label);

    println!();
    println!("{}", title);
    println!("{}", "=".repeat(title.chars().count()));
    println!("{}", estimate.formatted);
    println!();
    println!("{}", ESTIMATE_DISCLAIMER);

    println!("\n--- Vehicle Specifications ---");
    println!("Brand:           {}", selection.brand);
    println!("Model:           {}", selection.model);
    println!("Year:            {}", selection.year);
    println!("KMs Driven:      {}", group_thousands(u64::from(selection.kms_driven)));
    println!("Fuel Type:       {}", selection.fuel_type);
    println!("Transmission:    {}", selection.transmission);
    if let Some(ref seller) = selection.seller_type {
        println!("Seller Type:     {}", seller);
    }
    println!("------------------------------");

    Ok(())
}

pub fn output_features(output_format: OutputFormat, breakdown: &PriceBreakdown) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(breakdown)?);
        return Ok(());
    }

    let width = breakdown
        .aligned
        .names()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0);

    println!("\nEstimator features ({})", breakdown.aligned.len());
    for (name, value) in breakdown.aligned.iter() {
        println!("  {:<width$}  {}", name, value, width = width);
    }

    if !breakdown.unmatched.is_empty() {
        println!("\nNot used by the estimator:");
        for name in &breakdown.unmatched {
            println!("  {}", name);
        }
    }

    Ok(())
}

pub fn output_list(output_format: OutputFormat, title: &str, items: &[String]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }

    println!("{}", title);
    println!("{}", "=".repeat(title.chars().count()));
    for item in items {
        println!("  {}", item);
    }
    println!("\n{} total", items.len());
    Ok(())
}

pub fn output_choices(output_format: OutputFormat, choices: &MarketChoices) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(choices)?);
        return Ok(());
    }

    let title = format!("{} options", choices.market.label());
    println!("{}", title);
    println!("{}", "=".repeat(title.chars().count()));
    println!("Brands:          {}", choices.brands.len());
    println!("Fuel types:      {}", choices.fuel_types.join(", "));
    println!("Transmissions:   {}", choices.transmissions.join(", "));
    if !choices.seller_types.is_empty() {
        println!("Seller types:    {}", choices.seller_types.join(", "));
    }
    println!(
        "Year:            {}..={} (default {})",
        choices.year_min, choices.year_max, choices.default_year
    );
    println!(
        "KMs driven:      {}..={} step {} (default {})",
        group_thousands(u64::from(choices.kms_min)),
        group_thousands(u64::from(choices.kms_max)),
        group_thousands(u64::from(choices.kms_step)),
        group_thousands(u64::from(choices.default_kms)),
    );

    println!("\n--- Fixed specifications (dataset medians) ---");
    println!("Mileage:         {:.2} kmpl", choices.medians.mileage_kmpl);
    println!("Engine:          {:.0} cc", choices.medians.engine_cc);
    println!("Max power:       {:.2} bhp", choices.medians.max_power_bhp);

    println!("\n--- Models by brand ---");
    for brand in &choices.brands {
        println!("{}: {}", brand, choices.models_for(brand).join(", "));
    }

    Ok(())
}
