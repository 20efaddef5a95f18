#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the egui-based material selection predictor.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use matsel::config;
use matsel::egui_app::controller::EguiController;
use matsel::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use matsel::logging;
use matsel::material::FormInputs;
use matsel::predictor::PredictorClient;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let launch = config::load_or_default()
        .map(|config| {
            tracing::info!("Prediction service at {}", config.api.base_url);
            EguiController::new(PredictorClient::new(&config.api), FormInputs::default())
        })
        .map_err(|err| {
            tracing::error!("Failed to load config: {err}");
            format!("Failed to load config: {err}")
        });

    let viewport = egui::ViewportBuilder::default()
        .with_title("Material selection predictor")
        .with_inner_size(MIN_VIEWPORT_SIZE)
        .with_min_inner_size(MIN_VIEWPORT_SIZE);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Material selection predictor",
        native_options,
        Box::new(move |_cc| match launch {
            Ok(controller) => Ok(Box::new(EguiApp::new(controller))),
            Err(message) => Ok(Box::new(LaunchError { message })),
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
