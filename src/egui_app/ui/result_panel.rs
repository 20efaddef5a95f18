use super::EguiApp;
use super::style;
use crate::egui_app::view_model::{self, ResultView};
use eframe::egui::{self, Frame, Margin, RichText};

impl EguiApp {
    /// Render the inline error message or the verdict panel, whichever applies.
    pub(super) fn render_feedback(&mut self, ui: &mut egui::Ui) {
        let form = &self.controller.ui.form;
        if let Some(error) = view_model::visible_error(form) {
            ui.label(
                RichText::new(error).color(style::status_badge_color(style::StatusTone::Error)),
            );
        }
        if let Some(view) = view_model::visible_result(form) {
            render_result(ui, &view);
        }
    }
}

fn render_result(ui: &mut egui::Ui, view: &ResultView) {
    let palette = style::palette();
    Frame::NONE
        .fill(style::compartment_fill())
        .inner_margin(Margin::same(14))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.columns(2, |columns| {
                columns[0].label(RichText::new("Prediction").small().color(palette.text_muted));
                columns[0].label(
                    RichText::new(view.verdict)
                        .size(22.0)
                        .strong()
                        .color(style::verdict_color(view.usable)),
                );
                columns[1].label(RichText::new("Probability").small().color(palette.text_muted));
                columns[1].label(
                    RichText::new(&view.probability)
                        .size(22.0)
                        .strong()
                        .color(palette.text_primary),
                );
            });
        });
}
