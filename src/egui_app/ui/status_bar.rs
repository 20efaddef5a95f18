use super::EguiApp;
use super::style::{self, StatusTone};
use crate::egui_app::state::ServerHealthState;
use eframe::egui::{self, Frame, Margin, RichText};

impl EguiApp {
    /// Footer with the last action status and service reachability.
    pub(super) fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::NONE.fill(palette.bg_primary).inner_margin(Margin::same(6)))
            .show(ctx, |ui| {
                let mut check_clicked = false;
                ui.horizontal(|ui| {
                    let status = &self.controller.ui.status;
                    badge(ui, &status.badge_label, status.badge_color);
                    ui.label(RichText::new(&status.text).color(palette.text_primary));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let checking = self.controller.ui.server == ServerHealthState::Checking;
                        if ui
                            .add_enabled(!checking, egui::Button::new("Check server"))
                            .clicked()
                        {
                            check_clicked = true;
                        }
                        let (text, tone) = server_label(&self.controller.ui.server);
                        ui.label(
                            RichText::new(format!("{text} · {}", self.controller.api_base()))
                                .color(style::status_badge_color(tone)),
                        );
                    });
                });
                if check_clicked {
                    self.controller.check_server();
                }
            });
    }
}

fn badge(ui: &mut egui::Ui, label: &str, color: egui::Color32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
    ui.painter().circle_filled(rect.center(), 6.0, color);
    ui.label(RichText::new(label).strong());
    ui.separator();
}

fn server_label(state: &ServerHealthState) -> (String, StatusTone) {
    match state {
        ServerHealthState::Unknown => ("Server: unknown".to_string(), StatusTone::Idle),
        ServerHealthState::Checking => ("Server: checking…".to_string(), StatusTone::Busy),
        ServerHealthState::Online => ("Server: online".to_string(), StatusTone::Info),
        ServerHealthState::Degraded(reason) => {
            (format!("Server: degraded ({reason})"), StatusTone::Warning)
        }
        ServerHealthState::Offline(_) => ("Server: offline".to_string(), StatusTone::Error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_labels_reflect_state() {
        assert_eq!(
            server_label(&ServerHealthState::Online),
            ("Server: online".to_string(), StatusTone::Info)
        );
        let (text, tone) = server_label(&ServerHealthState::Degraded("HTTP 503".to_string()));
        assert_eq!(text, "Server: degraded (HTTP 503)");
        assert_eq!(tone, StatusTone::Warning);
        let (_, tone) = server_label(&ServerHealthState::Offline("refused".to_string()));
        assert_eq!(tone, StatusTone::Error);
    }
}
