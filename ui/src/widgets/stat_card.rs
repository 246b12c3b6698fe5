use egui::{Color32, Frame, Margin, RichText, Stroke, Ui};

/// Titled number in a bordered box, as shown above the lists and on the dashboard.
pub fn stat_card(ui: &mut Ui, title: &str, value: &str, accent: Color32) {
    Frame::NONE
        .stroke(Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
        .corner_radius(6.0)
        .inner_margin(Margin::symmetric(16, 12))
        .show(ui, |ui| {
            ui.set_min_width(150.0);
            ui.vertical(|ui| {
                ui.label(RichText::new(title).weak());
                ui.label(RichText::new(value).size(22.0).strong().color(accent));
            });
        });
}

/// One horizontal bar per `(label, value)`, scaled to the largest value.
pub fn bar_series(ui: &mut Ui, title: &str, points: &[(String, u64)], accent: Color32) {
    ui.label(RichText::new(title).strong());
    let max = points.iter().map(|(_, value)| *value).max().unwrap_or(0).max(1);
    egui::Grid::new(title).num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
        for (label, value) in points {
            ui.label(label);
            ui.add(
                egui::ProgressBar::new(*value as f32 / max as f32)
                    .desired_width(240.0)
                    .fill(accent)
                    .text(value.to_string()),
            );
            ui.end_row();
        }
    });
}
