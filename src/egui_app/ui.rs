//! egui renderer for the application UI.

mod prediction_form;
mod result_panel;
mod status_bar;
pub mod style;

use std::time::Duration;

use crate::egui_app::controller::EguiController;
use eframe::egui::{self, Frame, Margin, RichText};

/// Smallest window that still fits the form without clipping.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(560.0, 620.0);
const CARD_MAX_WIDTH: f32 = 640.0;
const LOADING_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    /// Create the app and kick off the initial server health probe.
    pub fn new(mut controller: EguiController) -> Self {
        controller.check_server();
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.reset();
        }
    }

    fn render_card(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.vertical_centered(|ui| {
            ui.set_max_width(CARD_MAX_WIDTH);
            Frame::NONE
                .fill(palette.bg_primary)
                .stroke(style::card_border())
                .inner_margin(Margin::same(24))
                .show(ui, |ui| {
                    ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                        self.render_header(ui);
                        ui.add_space(16.0);
                        self.render_prediction_form(ui);
                        ui.add_space(12.0);
                        self.render_feedback(ui);
                    });
                });
        });
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.label(
            RichText::new("MATERIAL VHASIS")
                .small()
                .color(palette.accent_mint),
        );
        ui.heading(RichText::new("Material selection predictor").strong());
        ui.label(
            RichText::new(
                "Enter mechanical properties to check if the material is suitable for selection.",
            )
            .color(palette.text_muted),
        );
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        self.handle_shortcuts(ctx);

        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("prediction_card_scroll")
                .show(ui, |ui| {
                    ui.add_space(24.0);
                    self.render_card(ui);
                });
        });

        if self.controller.is_busy() {
            ctx.request_repaint_after(LOADING_REPAINT_INTERVAL);
        }
    }
}
