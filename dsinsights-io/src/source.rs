//! Filesystem capture source.

use std::path::{Path, PathBuf};

pub use dsinsights_core::stats::RENDERED_OBJECT_INFO_DEFINITION_ID;
use dsinsights_core::{CaptureSource, ObjectTable, RenderedObjectInfo};

use crate::reader::load;
use crate::Result;

/// Capture source reading `metrics_*.json` files below a dataset root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSource {
    data_root: PathBuf,
    definition_id: String,
}

impl MetricsSource {
    /// Creates a source for `definition_id` under `data_root`.
    pub fn new(data_root: impl Into<PathBuf>, definition_id: impl Into<String>) -> Self {
        Self {
            data_root: data_root.into(),
            definition_id: definition_id.into(),
        }
    }

    /// Creates a source for the rendered object info metric.
    pub fn rendered_object_info(data_root: impl Into<PathBuf>) -> Self {
        Self::new(data_root, RENDERED_OBJECT_INFO_DEFINITION_ID)
    }

    /// Returns the dataset root.
    #[must_use]
    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// Returns the metric definition id.
    #[must_use]
    pub fn definition_id(&self) -> &str {
        &self.definition_id
    }
}

impl CaptureSource for MetricsSource {
    fn load(&self) -> dsinsights_core::Result<ObjectTable> {
        Ok(load(&self.data_root, &self.definition_id)?)
    }

    fn describe(&self) -> String {
        self.data_root.display().to_string()
    }
}

/// Loads the rendered object info of the dataset under `data_root`.
///
/// # Errors
/// Returns an error if the dataset cannot be loaded (see [`load`]).
pub fn load_rendered_object_info<P: AsRef<Path>>(
    data_root: P,
    definition_id: &str,
) -> Result<RenderedObjectInfo> {
    load(data_root, definition_id).map(RenderedObjectInfo::new)
}
