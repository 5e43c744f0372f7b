//! dsinsights-charts: Chart builders and the dataset overview page.
//!
//! Charts are plain [`ChartSpec`] values that rendering hosts draw natively or
//! export as Plotly JSON.
//!
//! # Example
//!
//! ```
//! use dsinsights_charts::overview::session::OverviewSession;
//! use dsinsights_charts::overview::{OverviewConfig, OBJECT_COUNT_FILTER, VALUE};
//! use dsinsights_core::{InMemorySource, ObjectTable};
//!
//! let mut table = ObjectTable::default();
//! table.push("capture-0", 1, "cube", 0, 120);
//! let mut session =
//!     OverviewSession::init(InMemorySource::new(table), OverviewConfig::default()).unwrap();
//! let update = session.dispatch(OBJECT_COUNT_FILTER, VALUE, "cube").unwrap();
//! assert_eq!(update.figure.row_count(), 1);
//! ```

pub mod binning;
mod error;
pub mod overview;
pub mod plot;
pub mod spec;

pub use binning::{auto_bins, MAX_AUTO_BINS};
pub use error::{Error, Result};
pub use overview::callbacks::{Callback, CallbackRegistry, Port, Update};
pub use overview::layout::{Element, Layout};
pub use overview::session::{FilterState, OverviewSession};
pub use overview::{OverviewConfig, MAX_SAMPLES};
pub use plot::{bar_plot, histogram_plot, BarPlotConfig, HistogramConfig};
pub use spec::{AxisValue, BarData, ChartData, ChartKind, ChartSpec, HistogramBin, HistogramData};
