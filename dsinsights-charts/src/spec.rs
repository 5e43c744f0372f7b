//! Declarative chart specifications.
//!
//! A [`ChartSpec`] is produced fresh for every request and never mutated by
//! rendering hosts. [`ChartSpec::to_plotly`] converts it into a Plotly figure
//! for web hosts; native hosts read the data directly.

use serde::Serialize;
use serde_json::{json, Value};

/// Kind of chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Histogram,
}

/// A value placed on a categorical or numeric axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(f64),
    Category(String),
}

impl std::fmt::Display for AxisValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisValue::Number(v) => write!(f, "{v}"),
            AxisValue::Category(s) => f.write_str(s),
        }
    }
}

/// One histogram bin. Bins are half-open `[start, end)` except the last.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    /// Bin width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Bin center.
    #[must_use]
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Bar chart data: one bar per row, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarData {
    pub x: Vec<AxisValue>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<Vec<String>>,
}

/// Histogram data: the binned values and the resulting bins.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistogramData {
    /// Values that were binned (after sampling).
    pub values: Vec<f64>,
    pub bins: Vec<HistogramBin>,
    /// Number of input rows before sampling.
    pub total_rows: usize,
}

impl HistogramData {
    /// Returns true if the values are a sample of a larger input.
    #[must_use]
    pub fn is_sampled(&self) -> bool {
        self.values.len() < self.total_rows
    }
}

/// Chart payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartData {
    Bar(BarData),
    Histogram(HistogramData),
}

/// A complete chart description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    /// Column mapped to the x axis.
    pub x: String,
    /// Column mapped to the y axis (bar charts only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    pub x_title: String,
    pub y_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_samples: Option<usize>,
    pub data: ChartData,
}

impl ChartSpec {
    /// Returns the chart kind.
    #[must_use]
    pub fn kind(&self) -> ChartKind {
        match self.data {
            ChartData::Bar(_) => ChartKind::Bar,
            ChartData::Histogram(_) => ChartKind::Histogram,
        }
    }

    /// Returns true if the chart has nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.data {
            ChartData::Bar(bar) => bar.x.is_empty(),
            ChartData::Histogram(hist) => hist.values.is_empty(),
        }
    }

    /// Number of data rows drawn.
    #[must_use]
    pub fn row_count(&self) -> usize {
        match &self.data {
            ChartData::Bar(bar) => bar.x.len(),
            ChartData::Histogram(hist) => hist.values.len(),
        }
    }

    /// Returns the bar data, if this is a bar chart.
    #[must_use]
    pub fn as_bar(&self) -> Option<&BarData> {
        match &self.data {
            ChartData::Bar(bar) => Some(bar),
            ChartData::Histogram(_) => None,
        }
    }

    /// Returns the histogram data, if this is a histogram.
    #[must_use]
    pub fn as_histogram(&self) -> Option<&HistogramData> {
        match &self.data {
            ChartData::Histogram(hist) => Some(hist),
            ChartData::Bar(_) => None,
        }
    }

    /// Renders the chart as a Plotly figure (`{"data": [...], "layout": {...}}`).
    #[must_use]
    pub fn to_plotly(&self) -> Value {
        let trace = match &self.data {
            ChartData::Bar(bar) => {
                let mut trace = json!({
                    "type": "bar",
                    "x": bar.x,
                    "y": bar.y,
                });
                if let Some(hover) = &bar.hover {
                    trace["hovertext"] = json!(hover);
                }
                trace
            }
            ChartData::Histogram(hist) => {
                let mut trace = json!({
                    "type": "histogram",
                    "x": hist.values,
                });
                if let (Some(first), Some(last)) = (hist.bins.first(), hist.bins.last()) {
                    trace["xbins"] = json!({
                        "start": first.start,
                        "end": last.end,
                        "size": first.width(),
                    });
                }
                trace
            }
        };

        json!({
            "data": [trace],
            "layout": {
                "title": { "text": self.title },
                "xaxis": { "title": { "text": self.x_title } },
                "yaxis": { "title": { "text": self.y_title } },
            }
        })
    }
}
