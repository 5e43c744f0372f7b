//! dsinsights-io: Dataset loading for dsinsights.
//!
//! This crate reads Unity Perception metric files into rendered-object
//! tables using memory-mapped files, and writes tables and aggregates as CSV.
//!

mod error;
mod reader;
mod source;
mod writer;

pub use error::{Error, Result};
pub use reader::{discover_metrics_files, load, MappedFileReader, MetricsChunk, MetricsFileReader};
pub use source::{load_rendered_object_info, MetricsSource, RENDERED_OBJECT_INFO_DEFINITION_ID};
pub use writer::TableWriter;
