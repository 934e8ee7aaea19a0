//! Main application structure

use eframe::egui::{self, Color32, RichText};

use carprice_app::config::Config;
use carprice_app::context::AppContext;

use crate::predict_panel::PredictPanel;

/// Outcome of loading the datasets and models at startup
enum LoadState {
    Ready {
        context: AppContext,
        panel: PredictPanel,
    },
    Failed {
        message: String,
        data_dir: String,
    },
}

/// Main application state
pub struct CarPriceApp {
    state: LoadState,
}

impl CarPriceApp {
    /// Create a new application instance; artifacts are loaded once here
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = egui::FontDefinitions::default();

        // The bundled fonts have no rupee sign, add a system font as fallback
        if let Some(font_data) = Self::load_system_font() {
            fonts.font_data.insert(
                "fallback".to_owned(),
                egui::FontData::from_owned(font_data).into(),
            );
            for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                fonts
                    .families
                    .entry(family)
                    .or_default()
                    .push("fallback".to_owned());
            }
        }

        cc.egui_ctx.set_fonts(fonts);

        let config = Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Config::default()
        });

        let state = match AppContext::load(&config) {
            Ok(context) => LoadState::Ready {
                panel: PredictPanel::new(&context, config.default_market),
                context,
            },
            Err(e) => {
                tracing::error!(error = %e, "failed to load market data");
                LoadState::Failed {
                    message: e.to_string(),
                    data_dir: config.data_dir().display().to_string(),
                }
            }
        };

        Self { state }
    }

    /// Load a system font that has the rupee sign
    fn load_system_font() -> Option<Vec<u8>> {
        let font_paths = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
            "C:/Windows/Fonts/segoeui.ttf",
            "C:/Windows/Fonts/Nirmala.ttf",
            "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
            "/Library/Fonts/Arial Unicode.ttf",
        ];

        for path in &font_paths {
            if let Ok(data) = std::fs::read(path) {
                return Some(data);
            }
        }
        None
    }

    fn error_ui(ui: &mut egui::Ui, message: &str, data_dir: &str) {
        ui.heading("Car Price Prediction Platform");
        ui.add_space(20.0);
        ui.label(RichText::new(message).color(Color32::LIGHT_RED).strong());
        ui.add_space(10.0);
        ui.label(format!("Data directory: {}", data_dir));
        ui.label(
            RichText::new("Set it with `carprice config --set-data-dir <DIR>` and restart.")
                .italics()
                .color(Color32::GRAY),
        );
    }
}

impl eframe::App for CarPriceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match &mut self.state {
            LoadState::Ready { context, panel } => {
                egui::SidePanel::left("vehicle_form")
                    .resizable(false)
                    .min_width(280.0)
                    .show(ctx, |ui| {
                        panel.form_ui(ui, context);
                    });

                egui::CentralPanel::default().show(ctx, |ui| {
                    panel.result_ui(ui);
                });
            }
            LoadState::Failed { message, data_dir } => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    Self::error_ui(ui, message, data_dir);
                });
            }
        }
    }
}
