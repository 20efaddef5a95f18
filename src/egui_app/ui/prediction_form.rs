use super::EguiApp;
use super::style;
use crate::egui_app::view_model;
use crate::material::MaterialField;
use eframe::egui::{self, RichText};

const INPUT_WIDTH: f32 = 180.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FormAction {
    None,
    Submit,
    Reset,
}

impl EguiApp {
    /// Render the six property inputs and the submit/reset buttons.
    pub(super) fn render_prediction_form(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let mut action = FormAction::None;

        egui::Grid::new("material_inputs_grid")
            .num_columns(2)
            .spacing([16.0, 10.0])
            .show(ui, |ui| {
                for field in MaterialField::ALL {
                    ui.label(RichText::new(field.label()).color(palette.text_primary));
                    let response = ui.add(
                        egui::TextEdit::singleline(self.controller.ui.form.inputs.field_mut(field))
                            .desired_width(INPUT_WIDTH)
                            .hint_text(field.key()),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        action = FormAction::Submit;
                    }
                    ui.end_row();
                }
            });

        ui.add_space(14.0);
        let status = self.controller.ui.form.status;
        ui.horizontal(|ui| {
            let submit = egui::Button::new(
                RichText::new(view_model::submit_label(status)).color(palette.accent_mint),
            );
            if ui
                .add_enabled(!self.controller.ui.form.is_loading(), submit)
                .clicked()
            {
                action = FormAction::Submit;
            }
            if ui.button("Reset").clicked() {
                action = FormAction::Reset;
            }
            if self.controller.ui.form.is_loading() {
                ui.add(egui::Spinner::new());
            }
        });

        match action {
            FormAction::None => {}
            FormAction::Submit => self.controller.submit(),
            FormAction::Reset => self.controller.reset(),
        }
    }
}
