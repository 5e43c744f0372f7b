//! Control panel (left sidebar) rendering.

use eframe::egui;
use rfd::FileDialog;

use super::theme::{accent, form_label, primary_button, Palette};
use crate::app::InsightsApp;

impl InsightsApp {
    /// Render the left control panel.
    pub(crate) fn render_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("ctrl")
            .default_width(240.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.add_space(8.0);
                        ui.label(
                            egui::RichText::new("DATASET INSIGHTS")
                                .size(14.0)
                                .strong()
                                .color(accent::BLUE),
                        );
                        ui.add_space(8.0);

                        self.render_dataset_controls(ui);
                        Self::render_section(ui, "Sampling", |ui| self.render_sampling_controls(ui));
                        Self::render_section(ui, "Statistics", |ui| self.render_statistics(ui));
                        Self::render_section(ui, "View", |ui| {
                            ui.checkbox(&mut self.ui_state.show_json, "Show layout JSON");
                        });

                        self.render_progress_status(ui);
                        ui.add_space(12.0);
                    });
            });
    }

    fn render_section(ui: &mut egui::Ui, title: &str, content: impl FnOnce(&mut egui::Ui)) {
        ui.separator();
        egui::CollapsingHeader::new(egui::RichText::new(title.to_uppercase()).size(11.0))
            .default_open(true)
            .show(ui, content);
    }

    fn render_dataset_controls(&mut self, ui: &mut egui::Ui) {
        let palette = Palette::from_ui(ui);
        let can_load = !self.processing.is_loading;

        if ui
            .add_enabled(can_load, egui::Button::new("Open dataset folder..."))
            .clicked()
        {
            if let Some(path) = FileDialog::new().pick_folder() {
                self.load_dataset(path);
            }
        }

        let root_text = self
            .data_root
            .as_ref()
            .map_or_else(|| "No dataset selected".to_string(), |p| p.display().to_string());
        ui.label(
            egui::RichText::new(root_text)
                .size(10.0)
                .color(palette.text_muted),
        );
    }

    fn render_sampling_controls(&mut self, ui: &mut egui::Ui) {
        ui.label(form_label("Max samples"));
        ui.horizontal(|ui| {
            ui.add(
                egui::DragValue::new(&mut self.max_samples)
                    .range(0..=1_000_000)
                    .speed(100.0),
            )
            .on_hover_text("0 plots every object");
        });

        ui.add_space(4.0);
        ui.checkbox(&mut self.ui_state.fixed_seed, "Fixed seed");
        ui.add_enabled(
            self.ui_state.fixed_seed,
            egui::DragValue::new(&mut self.ui_state.seed).range(0..=u64::MAX),
        );

        ui.add_space(8.0);
        let can_reload = self.data_root.is_some() && !self.processing.is_loading;
        if ui
            .add_enabled(can_reload, primary_button("Reload"))
            .clicked()
        {
            self.reload();
        }
    }

    fn render_progress_status(&self, ui: &mut egui::Ui) {
        ui.separator();
        if self.processing.is_loading {
            ui.add(
                egui::ProgressBar::new(self.processing.progress)
                    .text(&self.processing.status_text),
            );
        } else {
            let color = if self.processing.status_text.starts_with("Error") {
                accent::RED
            } else {
                Palette::from_ui(ui).text_muted
            };
            ui.label(
                egui::RichText::new(&self.processing.status_text)
                    .size(11.0)
                    .color(color),
            );
        }
    }
}
