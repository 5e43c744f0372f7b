//! Dataset overview page.
//!
//! The overview shows three dataset-wide charts and two label dropdowns, each
//! driving a label-filtered histogram. [`layout`] builds the element tree,
//! [`callbacks`] maps dropdown changes to chart updates and [`session`] ties
//! both to one loaded dataset.

pub mod callbacks;
pub mod layout;
pub mod session;

use dsinsights_core::stats::RENDERED_OBJECT_INFO_DEFINITION_ID;
use dsinsights_core::{ObjectRecord, RenderedObjectInfo};

use crate::plot::{bar_plot, histogram_plot, BarPlotConfig, HistogramConfig};
use crate::spec::ChartSpec;
use crate::Result;

/// Default sampling limit for overview histograms.
pub const MAX_SAMPLES: usize = 10_000;

pub const OVERVIEW: &str = "overview";
pub const TOTAL_COUNT: &str = "total_count";
pub const OBJECT_COUNT_FILTER: &str = "object_count_filter";
pub const PER_OBJECT_COUNT: &str = "per_object_count";
pub const PER_OBJECT_COUNT_FILTER_GRAPH: &str = "per_object_count_filter_graph";
pub const PIXELS_VISIBLE_FILTER: &str = "pixels_visible_filter";
pub const PIXELS_VISIBLE_PER_OBJECT: &str = "pixels_visible_per_object";
pub const PIXELS_VISIBLE_FILTER_GRAPH: &str = "pixels_visible_filter_graph";

/// Property carrying a dropdown selection.
pub const VALUE: &str = "value";
/// Property carrying a graph figure.
pub const FIGURE: &str = "figure";

/// Overview page settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewConfig {
    /// Metric definition id of the rendered object info.
    pub definition_id: String,
    /// Sampling limit for histograms; `None` bins every row.
    pub max_samples: Option<usize>,
    /// Seed for histogram sampling; `None` samples from OS entropy.
    pub seed: Option<u64>,
}

impl Default for OverviewConfig {
    fn default() -> Self {
        Self {
            definition_id: RENDERED_OBJECT_INFO_DEFINITION_ID.to_string(),
            max_samples: Some(MAX_SAMPLES),
            seed: None,
        }
    }
}

impl OverviewConfig {
    #[must_use]
    pub fn with_definition_id(mut self, definition_id: impl Into<String>) -> Self {
        self.definition_id = definition_id.into();
        self
    }

    #[must_use]
    pub fn with_max_samples(mut self, max_samples: Option<usize>) -> Self {
        self.max_samples = max_samples;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    fn histogram(&self, x: &str) -> HistogramConfig {
        HistogramConfig::new(x)
            .with_y_title("Frequency")
            .with_max_samples(self.max_samples)
            .with_seed(self.seed)
    }
}

/// Bar chart config of the total object counts.
#[must_use]
pub fn total_counts_config() -> BarPlotConfig {
    BarPlotConfig::new("label_id", "count")
        .with_x_title("Label Id")
        .with_y_title("Count")
        .with_title("Total Object Count in Dataset")
        .with_hover_name("label_name")
}

/// Histogram config of the object counts per capture.
#[must_use]
pub fn per_capture_count_config(config: &OverviewConfig) -> HistogramConfig {
    config
        .histogram("count")
        .with_x_title("Object Counts Per Capture")
        .with_title("Distribution of Object Counts Per Capture: Overall")
}

/// Histogram config of the visible pixels per object.
#[must_use]
pub fn pixels_visible_per_object_config(config: &OverviewConfig) -> HistogramConfig {
    config
        .histogram("visible_pixels")
        .with_x_title("Visible Pixels Per Object")
        .with_title("Distribution of Visible Pixels Per Object: Overall")
}

/// Histogram config of the object counts per capture for one label.
#[must_use]
pub fn object_count_for_label_config(config: &OverviewConfig, label: &str) -> HistogramConfig {
    config
        .histogram("count")
        .with_x_title(format!("Object Counts Per Capture For {label}"))
        .with_title(format!("Distribution of Object Counts Per Capture For {label}"))
}

/// Histogram config of the visible pixels for one label.
#[must_use]
pub fn visible_pixels_for_label_config(config: &OverviewConfig, label: &str) -> HistogramConfig {
    config
        .histogram("visible_pixels")
        .with_x_title(format!("Visible Pixels For {label}"))
        .with_title(format!("Distribution of Visible Pixels For {label}"))
}

/// Total object count bar chart.
///
/// # Errors
/// Propagates chart builder errors.
pub fn total_counts_figure(info: &RenderedObjectInfo) -> Result<ChartSpec> {
    bar_plot(&info.total_counts(), &total_counts_config())
}

/// Histogram of object counts per capture.
///
/// # Errors
/// Propagates chart builder errors.
pub fn per_capture_count_figure(
    info: &RenderedObjectInfo,
    config: &OverviewConfig,
) -> Result<ChartSpec> {
    histogram_plot(&info.per_capture_counts(), &per_capture_count_config(config))
}

/// Histogram of visible pixels per object.
///
/// # Errors
/// Propagates chart builder errors.
pub fn pixels_visible_per_object_figure(
    info: &RenderedObjectInfo,
    config: &OverviewConfig,
) -> Result<ChartSpec> {
    let rows: Vec<ObjectRecord<'_>> = info.raw_table().iter().collect();
    histogram_plot(&rows, &pixels_visible_per_object_config(config))
}

/// Histogram of object counts per capture, restricted to `label`.
///
/// # Errors
/// Propagates chart builder errors.
pub fn object_count_for_label_figure(
    info: &RenderedObjectInfo,
    config: &OverviewConfig,
    label: &str,
) -> Result<ChartSpec> {
    histogram_plot(
        &info.per_capture_counts_for_label(label),
        &object_count_for_label_config(config, label),
    )
}

/// Histogram of visible pixels, restricted to `label`.
///
/// # Errors
/// Propagates chart builder errors.
pub fn visible_pixels_for_label_figure(
    info: &RenderedObjectInfo,
    config: &OverviewConfig,
    label: &str,
) -> Result<ChartSpec> {
    histogram_plot(
        &info.visible_pixels(Some(label)),
        &visible_pixels_for_label_config(config, label),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsinsights_core::ObjectTable;

    fn info() -> RenderedObjectInfo {
        let mut table = ObjectTable::default();
        table.push("1", 1, "cube", 0, 100);
        table.push("1", 1, "cube", 1, 120);
        table.push("2", 2, "sphere", 0, 40);
        for i in 0..5 {
            table.push("3", 1, "cube", i, 80);
        }
        RenderedObjectInfo::new(table)
    }

    #[test]
    fn test_default_config() {
        let config = OverviewConfig::default();
        assert_eq!(config.definition_id, RENDERED_OBJECT_INFO_DEFINITION_ID);
        assert_eq!(config.max_samples, Some(MAX_SAMPLES));
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_overall_figures() {
        let info = info();
        let config = OverviewConfig::default();

        let total = total_counts_figure(&info).unwrap();
        assert_eq!(total.title, "Total Object Count in Dataset");
        assert_eq!(total.as_bar().unwrap().y, vec![7.0, 1.0]);

        let per_capture = per_capture_count_figure(&info, &config).unwrap();
        assert_eq!(per_capture.x_title, "Object Counts Per Capture");
        assert_eq!(per_capture.row_count(), 3);

        let pixels = pixels_visible_per_object_figure(&info, &config).unwrap();
        assert_eq!(pixels.title, "Distribution of Visible Pixels Per Object: Overall");
        assert_eq!(pixels.row_count(), 8);
    }

    #[test]
    fn test_label_figures() {
        let info = info();
        let config = OverviewConfig::default();

        let counts = object_count_for_label_figure(&info, &config, "cube").unwrap();
        assert_eq!(counts.title, "Distribution of Object Counts Per Capture For cube");
        assert_eq!(counts.x_title, "Object Counts Per Capture For cube");
        let mut values = counts.as_histogram().unwrap().values.clone();
        values.sort_by(f64::total_cmp);
        assert_eq!(values, vec![2.0, 5.0]);

        let pixels = visible_pixels_for_label_figure(&info, &config, "sphere").unwrap();
        assert_eq!(pixels.title, "Distribution of Visible Pixels For sphere");
        assert_eq!(pixels.as_histogram().unwrap().values, vec![40.0]);
    }

    #[test]
    fn test_absent_label_is_empty_chart() {
        let info = info();
        let config = OverviewConfig::default();
        let spec = visible_pixels_for_label_figure(&info, &config, "torus").unwrap();
        assert!(spec.is_empty());
        assert_eq!(spec.x_title, "Visible Pixels For torus");
    }
}
