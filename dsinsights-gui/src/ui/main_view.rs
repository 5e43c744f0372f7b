//! Main view (central panel) rendering.
//!
//! Walks the overview element tree: containers become (column) groups,
//! dropdowns become combo boxes and graphs are drawn with [`show_chart`].

use dsinsights_charts::overview::VALUE;
use dsinsights_charts::Element;
use eframe::egui;

use super::chart::show_chart;
use crate::app::InsightsApp;

/// A dropdown choice made this frame: `(element id, label)`.
type Selection = Option<(String, String)>;

impl InsightsApp {
    /// Render the central panel with the overview page.
    pub(crate) fn render_central_panel(&mut self, ctx: &egui::Context) {
        let mut selection: Selection = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(session) = &self.session else {
                ui.centered_and_justified(|ui| ui.label("No Data"));
                return;
            };
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| render_element(ui, session.layout().root(), &mut selection));
        });

        if let Some((element_id, label)) = selection {
            self.select_label(&element_id, VALUE, &label);
        }
    }

    /// Render the layout JSON window (if visible).
    pub(crate) fn render_json_window(&mut self, ctx: &egui::Context) {
        if !self.ui_state.show_json {
            return;
        }
        let text = self.session.as_ref().map_or_else(
            || "{}".to_string(),
            |session| {
                serde_json::to_string_pretty(&session.layout().to_json())
                    .unwrap_or_else(|e| format!("cannot serialize layout: {e}"))
            },
        );

        egui::Window::new("Layout JSON")
            .open(&mut self.ui_state.show_json)
            .default_size([520.0, 600.0])
            .show(ctx, |ui| {
                egui::ScrollArea::both().show(ui, |ui| {
                    ui.add(egui::TextEdit::multiline(&mut text.as_str()).code_editor());
                });
            });
    }
}

fn render_element(ui: &mut egui::Ui, element: &Element, selection: &mut Selection) {
    match element {
        Element::Div {
            children, style, ..
        } => {
            let centered = style.text_align.as_deref() == Some("center");
            match style.column_count {
                Some(count) if count > 1 => {
                    let count = count as usize;
                    ui.columns(count, |columns| {
                        for (i, child) in children.iter().enumerate() {
                            render_child(&mut columns[i % count], child, centered, selection);
                        }
                    });
                }
                _ => {
                    for child in children {
                        render_child(ui, child, centered, selection);
                    }
                }
            }
        }
        Element::Markdown(text) => {
            ui.heading(text.trim_start_matches('#').trim());
        }
        Element::Graph { id, figure } => match figure {
            Some(spec) => show_chart(ui, id, spec),
            None => {
                ui.weak("Select a label to render this chart");
            }
        },
        Element::Dropdown { id, options, value } => {
            egui::ComboBox::from_id_salt(id.as_str())
                .selected_text(value.as_deref().unwrap_or("Select a label"))
                .width(200.0)
                .show_ui(ui, |ui| {
                    for option in options {
                        let selected = value.as_deref() == Some(option.as_str());
                        if ui.selectable_label(selected, option).clicked() && !selected {
                            *selection = Some((id.clone(), option.clone()));
                        }
                    }
                });
        }
    }
    ui.add_space(8.0);
}

fn render_child(ui: &mut egui::Ui, child: &Element, centered: bool, selection: &mut Selection) {
    if centered {
        ui.vertical_centered(|ui| render_element(ui, child, selection));
    } else {
        render_element(ui, child, selection);
    }
}
