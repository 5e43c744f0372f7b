//! Bar and histogram chart builders.
//!
//! Both builders read columns by name through [`Record`], so the same code
//! charts total counts, per-capture counts and raw object rows.

use dsinsights_core::{Field, Record};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::binning::auto_bins;
use crate::spec::{AxisValue, BarData, ChartData, ChartSpec, HistogramData};
use crate::{Error, Result};

/// Configuration for [`bar_plot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarPlotConfig {
    pub x: String,
    pub y: String,
    pub x_title: String,
    pub y_title: String,
    pub title: String,
    /// Column shown as hover text.
    pub hover_name: Option<String>,
}

impl BarPlotConfig {
    /// Creates a config mapping column `x` to the x axis and `y` to bar height.
    ///
    /// Axis titles default to the column names.
    #[must_use]
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        let x = x.into();
        let y = y.into();
        Self {
            x_title: x.clone(),
            y_title: y.clone(),
            x,
            y,
            title: String::new(),
            hover_name: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_x_title(mut self, x_title: impl Into<String>) -> Self {
        self.x_title = x_title.into();
        self
    }

    #[must_use]
    pub fn with_y_title(mut self, y_title: impl Into<String>) -> Self {
        self.y_title = y_title.into();
        self
    }

    #[must_use]
    pub fn with_hover_name(mut self, column: impl Into<String>) -> Self {
        self.hover_name = Some(column.into());
        self
    }

    /// Returns a chart with these titles and no bars.
    #[must_use]
    pub fn empty_chart(&self) -> ChartSpec {
        ChartSpec {
            title: self.title.clone(),
            x: self.x.clone(),
            y: Some(self.y.clone()),
            x_title: self.x_title.clone(),
            y_title: self.y_title.clone(),
            max_samples: None,
            data: ChartData::Bar(BarData::default()),
        }
    }
}

/// Configuration for [`histogram_plot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramConfig {
    pub x: String,
    pub x_title: String,
    pub y_title: String,
    pub title: String,
    /// Upper bound on binned rows; larger inputs are sampled down.
    pub max_samples: Option<usize>,
    /// Seed for reproducible sampling.
    pub seed: Option<u64>,
}

impl HistogramConfig {
    /// Creates a config binning column `x`.
    #[must_use]
    pub fn new(x: impl Into<String>) -> Self {
        let x = x.into();
        Self {
            x_title: x.clone(),
            x,
            y_title: "Frequency".to_string(),
            title: String::new(),
            max_samples: None,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_x_title(mut self, x_title: impl Into<String>) -> Self {
        self.x_title = x_title.into();
        self
    }

    #[must_use]
    pub fn with_y_title(mut self, y_title: impl Into<String>) -> Self {
        self.y_title = y_title.into();
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

    /// Returns a chart with these titles and no values.
    #[must_use]
    pub fn empty_chart(&self) -> ChartSpec {
        ChartSpec {
            title: self.title.clone(),
            x: self.x.clone(),
            y: None,
            x_title: self.x_title.clone(),
            y_title: self.y_title.clone(),
            max_samples: self.max_samples,
            data: ChartData::Histogram(HistogramData::default()),
        }
    }

    fn create_rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }
}

fn check_column<R: Record>(column: &str) -> Result<()> {
    if R::COLUMNS.contains(&column) {
        Ok(())
    } else {
        Err(Error::UnknownColumn {
            column: column.to_string(),
            available: R::COLUMNS,
        })
    }
}

fn numeric<R: Record>(row: &R, column: &str) -> Result<f64> {
    row.field(column)
        .and_then(|f| f.as_f64())
        .ok_or_else(|| Error::NonNumericColumn(column.to_string()))
}

/// Builds a bar chart with one bar per row, in input order.
///
/// # Errors
/// Returns `UnknownColumn` if a configured column does not exist on `R`, or
/// `NonNumericColumn` if the `y` column holds text.
pub fn bar_plot<R: Record>(rows: &[R], config: &BarPlotConfig) -> Result<ChartSpec> {
    check_column::<R>(&config.x)?;
    check_column::<R>(&config.y)?;
    if let Some(hover) = &config.hover_name {
        check_column::<R>(hover)?;
    }

    let mut data = BarData {
        x: Vec::with_capacity(rows.len()),
        y: Vec::with_capacity(rows.len()),
        hover: config
            .hover_name
            .as_ref()
            .map(|_| Vec::with_capacity(rows.len())),
    };

    for row in rows {
        let x = match row.field(&config.x) {
            Some(Field::Text(s)) => AxisValue::Category(s.to_string()),
            Some(f) => AxisValue::Number(f.as_f64().unwrap_or_default()),
            None => continue,
        };
        data.x.push(x);
        data.y.push(numeric(row, &config.y)?);
        if let (Some(column), Some(hover)) = (&config.hover_name, data.hover.as_mut()) {
            hover.push(row.field(column).map(|f| f.to_string()).unwrap_or_default());
        }
    }

    let mut spec = config.empty_chart();
    spec.data = ChartData::Bar(data);
    Ok(spec)
}

/// Builds a histogram of column `x`.
///
/// When `max_samples` is set and there are more rows, exactly `max_samples`
/// rows are drawn uniformly without replacement before binning.
///
/// # Errors
/// Returns `UnknownColumn` if `x` does not exist on `R`, or
/// `NonNumericColumn` if it holds text.
pub fn histogram_plot<R: Record>(rows: &[R], config: &HistogramConfig) -> Result<ChartSpec> {
    check_column::<R>(&config.x)?;

    let total_rows = rows.len();
    let values: Vec<f64> = match config.max_samples {
        Some(max) if total_rows > max => {
            let mut indices: Vec<usize> = (0..total_rows).collect();
            let mut rng = config.create_rng();
            let (chosen, _) = indices.partial_shuffle(&mut rng, max);
            chosen.sort_unstable();
            log::debug!("sampled {max} of {total_rows} rows for {:?}", config.title);
            chosen
                .iter()
                .map(|&i| numeric(&rows[i], &config.x))
                .collect::<Result<_>>()?
        }
        _ => rows
            .iter()
            .map(|row| numeric(row, &config.x))
            .collect::<Result<_>>()?,
    };

    let bins = auto_bins(&values);
    let mut spec = config.empty_chart();
    spec.data = ChartData::Histogram(HistogramData {
        values,
        bins,
        total_rows,
    });
    Ok(spec)
}
