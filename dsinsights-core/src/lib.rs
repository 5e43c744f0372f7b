//! dsinsights-core: Core tables and aggregations for synthetic dataset statistics.
//!
//! This crate provides the columnar rendered-object table, the aggregations
//! computed over it, system configuration and the estimator registry.
//!

pub mod config;
pub mod error;
pub mod estimator;
pub mod record;
pub mod source;
pub mod stats;
pub mod table;

pub use config::SystemConfig;
pub use error::{Error, Result};
pub use estimator::{Estimator, EstimatorConfig, EstimatorConstructor, EstimatorRegistry, Metrics};
pub use record::{Field, Record};
pub use source::{CaptureSource, InMemorySource};
pub use stats::{CaptureCount, PixelSample, RenderedObjectInfo, TotalCount};
pub use table::{ObjectRecord, ObjectTable};
