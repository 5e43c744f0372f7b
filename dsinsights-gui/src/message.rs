//! Application message types for async communication.
//!
//! Messages are sent from the loader thread to the main UI thread via a
//! channel to report progress, completion, and errors.

use std::time::Duration;

use dsinsights_charts::OverviewSession;
use dsinsights_io::MetricsSource;

/// Messages sent from background workers to the UI thread.
pub enum AppMessage {
    /// Dataset loading progress update.
    LoadProgress(f32, String),

    /// Dataset loaded and the overview rendered.
    LoadComplete(Box<OverviewSession<MetricsSource>>, Duration),

    /// Dataset loading failed.
    LoadError(String),
}
