//! Prediction form and result display

use eframe::egui::{self, Color32, RichText, Ui};

use carprice_app::app::{estimate, PriceEstimate, SelectionDraft};
use carprice_app::constants::ESTIMATE_DISCLAIMER;
use carprice_app::context::AppContext;
use carprice_domain::model::VehicleSelection;
use carprice_domain::service::group_thousands;
use carprice_types::Market;

/// Form state for the selected market
pub struct PredictPanel {
    market: Market,
    /// None when the market offers nothing to pick
    selection: Option<VehicleSelection>,
    /// Outcome of the last "Predict Price" click, cleared on any form change
    result: Option<Result<PriceEstimate, String>>,
}

impl PredictPanel {
    pub fn new(context: &AppContext, market: Market) -> Self {
        Self {
            market,
            selection: initial_selection(context, market),
            result: None,
        }
    }

    /// Left side panel: market choice and vehicle details
    pub fn form_ui(&mut self, ui: &mut Ui, context: &AppContext) {
        ui.heading("Car Price Prediction");
        ui.add_space(8.0);

        ui.label(RichText::new("Select Market").strong());
        let previous_market = self.market;
        for market in Market::ALL {
            ui.radio_value(&mut self.market, market, market.label());
        }
        if self.market != previous_market {
            self.selection = initial_selection(context, self.market);
            self.result = None;
        }

        ui.separator();
        ui.label(RichText::new("Vehicle Details").strong());
        ui.add_space(5.0);

        let market_context = context.market(self.market);
        let choices = market_context.choices();

        let Some(selection) = self.selection.as_mut() else {
            ui.label(
                RichText::new("No vehicles available for this market")
                    .italics()
                    .color(Color32::YELLOW),
            );
            return;
        };
        let before = selection.clone();

        egui::Grid::new("vehicle_form_grid")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                combo(ui, "Brand", &mut selection.brand, &choices.brands);
                if selection.brand != before.brand {
                    selection.model = choices
                        .models_for(&selection.brand)
                        .first()
                        .cloned()
                        .unwrap_or_default();
                }
                combo(
                    ui,
                    "Model",
                    &mut selection.model,
                    choices.models_for(&selection.brand),
                );

                ui.label("Year");
                ui.add(egui::Slider::new(
                    &mut selection.year,
                    choices.year_min..=choices.year_max,
                ));
                ui.end_row();

                ui.label("Kilometers Driven");
                ui.add(
                    egui::Slider::new(&mut selection.kms_driven, choices.kms_min..=choices.kms_max)
                        .step_by(f64::from(choices.kms_step)),
                );
                ui.end_row();

                combo(ui, "Fuel Type", &mut selection.fuel_type, &choices.fuel_types);
                combo(
                    ui,
                    "Transmission",
                    &mut selection.transmission,
                    &choices.transmissions,
                );
                if let Some(seller_type) = selection.seller_type.as_mut() {
                    combo(ui, "Seller Type", seller_type, &choices.seller_types);
                }
            });

        if *selection != before {
            self.result = None;
        }

        ui.add_space(12.0);
        if ui
            .add_sized([ui.available_width(), 32.0], egui::Button::new("Predict Price"))
            .clicked()
        {
            self.result = Some(estimate(market_context, selection).map_err(|e| e.to_string()));
        }
    }

    /// Central panel: price and specification summary
    pub fn result_ui(&self, ui: &mut Ui) {
        match &self.result {
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new("Choose the vehicle details and press Predict Price")
                            .italics()
                            .color(Color32::GRAY),
                    );
                });
            }
            Some(Err(message)) => {
                ui.label(RichText::new(message).color(Color32::LIGHT_RED));
            }
            Some(Ok(estimate)) => estimate_ui(ui, estimate),
        }
    }
}

fn initial_selection(context: &AppContext, market: Market) -> Option<VehicleSelection> {
    match context.market(market).choices().complete(SelectionDraft::new()) {
        Ok(selection) => Some(selection),
        Err(e) => {
            tracing::warn!(%market, error = %e, "no initial selection");
            None
        }
    }
}

/// Labelled dropdown as one grid row
fn combo(ui: &mut Ui, label: &str, value: &mut String, options: &[String]) {
    ui.label(label);
    egui::ComboBox::from_id_salt(label)
        .selected_text(value.as_str())
        .width(180.0)
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(value, option.clone(), option.as_str());
            }
        });
    ui.end_row();
}

fn estimate_ui(ui: &mut Ui, estimate: &PriceEstimate) {
    ui.vertical_centered(|ui| {
        ui.add_space(30.0);
        ui.heading(format!("Estimated {}", estimate.label));
        ui.add_space(10.0);
        ui.label(
            RichText::new(&estimate.formatted)
                .size(40.0)
                .strong()
                .color(Color32::LIGHT_GREEN),
        );
        ui.add_space(10.0);
        ui.label(RichText::new(ESTIMATE_DISCLAIMER).italics().color(Color32::GRAY));
        ui.add_space(30.0);
    });

    ui.separator();
    ui.label(RichText::new("Vehicle Specifications").strong().size(18.0));
    ui.add_space(5.0);

    let selection = &estimate.selection;
    egui::Grid::new("vehicle_specifications")
        .num_columns(4)
        .spacing([20.0, 6.0])
        .striped(true)
        .show(ui, |ui| {
            spec_row(ui, "Brand", &selection.brand, "Model", &selection.model);
            spec_row(
                ui,
                "Year",
                &selection.year.to_string(),
                "KMs Driven",
                &group_thousands(u64::from(selection.kms_driven)),
            );
            spec_row(
                ui,
                "Fuel Type",
                &selection.fuel_type,
                "Transmission",
                &selection.transmission,
            );
            if let Some(ref seller) = selection.seller_type {
                ui.label(RichText::new("Seller Type").strong());
                ui.label(seller.as_str());
                ui.end_row();
            }
        });
}

fn spec_row(ui: &mut Ui, left_label: &str, left: &str, right_label: &str, right: &str) {
    ui.label(RichText::new(left_label).strong());
    ui.label(left);
    ui.label(RichText::new(right_label).strong());
    ui.label(right);
    ui.end_row();
}
