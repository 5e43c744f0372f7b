//! Statistics panel rendering.

use eframe::egui;

use super::theme::{stat_label, stat_value, stat_value_highlight, Palette};
use crate::app::InsightsApp;
use crate::util::{format_number, format_number_si};

impl InsightsApp {
    /// Render a single stat row with label on left and value on right.
    fn stat_row(ui: &mut egui::Ui, label: &str, value: &str, highlight: bool) {
        ui.horizontal(|ui| {
            ui.label(stat_label(label));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if highlight {
                    ui.label(stat_value_highlight(value));
                } else {
                    ui.label(stat_value(value));
                }
            });
        });
    }

    /// Render the statistics panel with two-column layout.
    pub(crate) fn render_statistics(&self, ui: &mut egui::Ui) {
        let stats = &self.statistics;
        if stats.object_count == 0 {
            ui.label(
                egui::RichText::new("No data loaded")
                    .size(11.0)
                    .color(Palette::from_ui(ui).text_muted),
            );
            return;
        }

        Self::stat_row(ui, "Objects", &format_number(stats.object_count), true);
        Self::stat_row(ui, "Captures", &format_number(stats.capture_count), false);
        Self::stat_row(ui, "Labels", &format_number(stats.label_count), false);

        if let Some(mean) = stats.objects_per_capture() {
            Self::stat_row(ui, "Per capture", &format!("{mean:.2}"), false);
        }

        if let Some(speed) = stats.load_speed() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let speed_usize = speed as usize;
            Self::stat_row(
                ui,
                "Speed",
                &format!("{} obj/s", format_number_si(speed_usize)),
                false,
            );
        }

        if let Some(dur) = stats.load_duration {
            Self::stat_row(ui, "Duration", &format!("{:.2}s", dur.as_secs_f64()), false);
        }
    }
}
