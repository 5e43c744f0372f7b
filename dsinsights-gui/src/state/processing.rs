//! Processing state for background operations.

/// Tracks the state of the background dataset load.
pub struct ProcessingState {
    /// Whether a dataset is currently being loaded.
    pub is_loading: bool,
    /// Progress value from 0.0 to 1.0.
    pub progress: f32,
    /// User-facing status message.
    pub status_text: String,
}

impl Default for ProcessingState {
    fn default() -> Self {
        Self {
            is_loading: false,
            progress: 0.0,
            status_text: "Open a dataset folder".to_string(),
        }
    }
}
