//! Summary of the loaded dataset.

use std::time::Duration;

use dsinsights_core::RenderedObjectInfo;

/// Statistics for the current session.
#[derive(Default)]
pub struct Statistics {
    /// Number of object rows loaded.
    pub object_count: usize,
    /// Number of captures with at least one object.
    pub capture_count: usize,
    /// Number of distinct labels.
    pub label_count: usize,
    /// Time taken to load the dataset.
    pub load_duration: Option<Duration>,
}

impl Statistics {
    /// Summarizes a loaded dataset.
    #[must_use]
    pub fn from_info(info: &RenderedObjectInfo, load_duration: Duration) -> Self {
        Self {
            object_count: info.num_objects(),
            capture_count: info.num_captures(),
            label_count: info.label_names().len(),
            load_duration: Some(load_duration),
        }
    }

    /// Clear all statistics.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Mean number of objects per capture.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn objects_per_capture(&self) -> Option<f64> {
        (self.capture_count > 0).then(|| self.object_count as f64 / self.capture_count as f64)
    }

    /// Load speed in objects/sec.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_speed(&self) -> Option<f64> {
        self.load_duration.map(|d| {
            let secs = d.as_secs_f64();
            if secs > 0.0 {
                self.object_count as f64 / secs
            } else {
                0.0
            }
        })
    }
}
