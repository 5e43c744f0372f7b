//! UI state for panel visibility and view options.

/// UI panel visibility and toggle state.
#[derive(Default)]
pub struct UiState {
    /// Whether to show the layout JSON window.
    pub show_json: bool,
    /// Whether histogram sampling uses a fixed seed.
    pub fixed_seed: bool,
    /// Seed used when `fixed_seed` is set.
    pub seed: u64,
}
