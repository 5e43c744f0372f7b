//! Native rendering of chart specs with `egui_plot`.

use dsinsights_charts::{AxisValue, BarData, ChartSpec, HistogramData};
use eframe::egui;
use egui_plot::{Bar, BarChart, Plot};

use super::theme::{accent, Palette};
use crate::util::usize_to_f64;

const PLOT_HEIGHT: f32 = 280.0;

/// Draw `spec` under its title. `id` keeps plot state apart between graphs.
pub fn show_chart(ui: &mut egui::Ui, id: &str, spec: &ChartSpec) {
    ui.label(egui::RichText::new(&spec.title).strong());

    if spec.is_empty() {
        ui.add_sized(
            [ui.available_width(), PLOT_HEIGHT],
            egui::Label::new(egui::RichText::new("No data").color(Palette::from_ui(ui).text_muted)),
        );
        return;
    }

    let plot = Plot::new(id)
        .height(PLOT_HEIGHT)
        .x_axis_label(spec.x_title.clone())
        .y_axis_label(spec.y_title.clone())
        .allow_scroll(false)
        .include_y(0.0);

    if let Some(bars) = spec.as_bar() {
        show_bars(ui, plot, bars);
    } else if let Some(histogram) = spec.as_histogram() {
        if histogram.is_sampled() {
            ui.label(
                egui::RichText::new(format!(
                    "Showing {} of {} objects",
                    histogram.values.len(),
                    histogram.total_rows
                ))
                .size(10.0)
                .color(Palette::from_ui(ui).text_muted),
            );
        }
        show_histogram(ui, plot, histogram);
    }
}

fn show_bars(ui: &mut egui::Ui, plot: Plot, data: &BarData) {
    let categories: Vec<String> = data
        .x
        .iter()
        .filter_map(|x| match x {
            AxisValue::Category(name) => Some(name.clone()),
            AxisValue::Number(_) => None,
        })
        .collect();

    let bars: Vec<Bar> = data
        .x
        .iter()
        .zip(&data.y)
        .enumerate()
        .map(|(i, (x, &y))| {
            let position = match x {
                AxisValue::Number(v) => *v,
                AxisValue::Category(_) => usize_to_f64(i),
            };
            let name = data
                .hover
                .as_ref()
                .and_then(|hover| hover.get(i))
                .map_or_else(|| x.to_string(), Clone::clone);
            Bar::new(position, y).width(0.8).name(name).fill(accent::BLUE)
        })
        .collect();

    let plot = if categories.is_empty() {
        plot
    } else {
        plot.x_axis_formatter(move |mark, _range| category_tick(&categories, mark.value))
    };
    plot.show(ui, |plot_ui| plot_ui.bar_chart(BarChart::new(bars)));
}

fn show_histogram(ui: &mut egui::Ui, plot: Plot, data: &HistogramData) {
    let bars: Vec<Bar> = data
        .bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), usize_to_f64(bin.count))
                .width(bin.width())
                .name(format!("[{}, {})", bin.start, bin.end))
                .fill(accent::GREEN)
        })
        .collect();
    plot.show(ui, |plot_ui| plot_ui.bar_chart(BarChart::new(bars)));
}

/// Tick text for a categorical axis; blank between category positions.
fn category_tick(categories: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = rounded as usize;
    categories.get(index).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_tick() {
        let categories = vec!["cube".to_string(), "sphere".to_string()];
        assert_eq!(category_tick(&categories, 0.0), "cube");
        assert_eq!(category_tick(&categories, 1.0), "sphere");
        assert_eq!(category_tick(&categories, 0.5), "");
        assert_eq!(category_tick(&categories, 2.0), "");
        assert_eq!(category_tick(&categories, -1.0), "");
    }
}
