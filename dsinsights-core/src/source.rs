//! Capture table sources.
//!
//! A source produces the rendered-object table a session works on. The
//! filesystem implementation lives in `dsinsights-io`; [`InMemorySource`]
//! serves an already built table.

use crate::table::ObjectTable;
use crate::Result;

/// Trait for collaborators that load a capture table.
pub trait CaptureSource: Send + Sync {
    /// Loads the full table.
    ///
    /// # Errors
    /// Returns `Error::Load` if the underlying data is unavailable.
    fn load(&self) -> Result<ObjectTable>;

    /// Short human readable description (path, dataset name).
    fn describe(&self) -> String;
}

/// A source backed by a table held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    table: ObjectTable,
}

impl InMemorySource {
    /// Wraps `table`.
    #[must_use]
    pub fn new(table: ObjectTable) -> Self {
        Self { table }
    }
}

impl CaptureSource for InMemorySource {
    fn load(&self) -> Result<ObjectTable> {
        Ok(self.table.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory table ({} objects)", self.table.len())
    }
}

impl<S: CaptureSource + ?Sized> CaptureSource for Box<S> {
    fn load(&self) -> Result<ObjectTable> {
        (**self).load()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
