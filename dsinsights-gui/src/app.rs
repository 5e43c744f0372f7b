//! Main application state and logic.
//!
//! Contains the `InsightsApp` struct which owns the overview session,
//! the loader channel and UI state.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use dsinsights_charts::{OverviewConfig, OverviewSession, MAX_SAMPLES};
use dsinsights_io::MetricsSource;
use eframe::egui;

use crate::message::AppMessage;
use crate::pipeline::load_dataset_worker;
use crate::state::{ProcessingState, Statistics, UiState};

/// Main application state.
pub struct InsightsApp {
    /// Currently selected dataset root.
    pub(crate) data_root: Option<PathBuf>,
    /// Histogram sampling limit; 0 disables sampling.
    pub(crate) max_samples: usize,

    /// Overview of the loaded dataset.
    pub(crate) session: Option<OverviewSession<MetricsSource>>,
    /// Summary of the loaded dataset.
    pub(crate) statistics: Statistics,
    /// UI display state.
    pub(crate) ui_state: UiState,

    /// Message receiver for async operations.
    pub(crate) rx: Receiver<AppMessage>,
    /// Message sender for async operations.
    pub(crate) tx: Sender<AppMessage>,

    /// Processing state (loading progress).
    pub(crate) processing: ProcessingState,
}

impl Default for InsightsApp {
    fn default() -> Self {
        let (tx, rx) = channel();
        Self {
            data_root: None,
            max_samples: MAX_SAMPLES,
            session: None,
            statistics: Statistics::default(),
            ui_state: UiState::default(),
            rx,
            tx,
            processing: ProcessingState::default(),
        }
    }
}

impl InsightsApp {
    /// Creates the app and starts loading `data_root` if given.
    pub fn new(data_root: Option<PathBuf>) -> Self {
        let mut app = Self::default();
        if let Some(root) = data_root {
            app.load_dataset(root);
        }
        app
    }

    /// Overview settings from the current UI state.
    pub fn overview_config(&self) -> OverviewConfig {
        OverviewConfig::default()
            .with_max_samples((self.max_samples > 0).then_some(self.max_samples))
            .with_seed(self.ui_state.fixed_seed.then_some(self.ui_state.seed))
    }

    /// Load a dataset asynchronously.
    ///
    /// Ignored while another load is running, so only one worker reports back.
    pub fn load_dataset(&mut self, path: PathBuf) {
        if self.processing.is_loading {
            log::warn!("ignoring load of {} while a load is running", path.display());
            return;
        }
        self.reset_load_state(path.as_path());

        let tx = self.tx.clone();
        let config = self.overview_config();
        thread::spawn(move || load_dataset_worker(path.as_path(), config, &tx));
    }

    /// Reload the current dataset, e.g. after changing sampling settings.
    pub fn reload(&mut self) {
        if let Some(path) = self.data_root.clone() {
            self.load_dataset(path);
        }
    }

    /// Reset application state for a new dataset load.
    fn reset_load_state(&mut self, path: &Path) {
        self.data_root = Some(path.to_path_buf());
        self.processing.is_loading = true;
        self.processing.progress = 0.0;
        self.processing.status_text.clear();
        self.processing.status_text.push_str("Loading dataset...");
        if let Some(session) = self.session.take() {
            session.teardown();
        }
        self.statistics.clear();
    }

    /// Forward a dropdown selection to the session.
    pub fn select_label(&mut self, element_id: &str, property: &str, label: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.dispatch(element_id, property, label) {
            Some(update) => log::debug!(
                "{element_id} = {label:?} updated {}",
                update.output.element_id
            ),
            None => log::warn!("{element_id}.{property} has no callback"),
        }
    }

    /// Handle pending messages from async workers.
    pub fn handle_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                AppMessage::LoadProgress(p, s) => {
                    self.processing.progress = p;
                    self.processing.status_text = s;
                }
                AppMessage::LoadComplete(session, dur) => {
                    self.processing.is_loading = false;
                    self.processing.progress = 1.0;
                    self.statistics = Statistics::from_info(session.info(), dur);
                    self.processing.status_text = format!(
                        "Loaded {} objects in {:.2}s",
                        self.statistics.object_count,
                        dur.as_secs_f64()
                    );
                    self.session = Some(*session);
                }
                AppMessage::LoadError(e) => {
                    self.processing.is_loading = false;
                    self.processing.status_text = format!("Error: {e}");
                }
            }
        }
    }
}

impl eframe::App for InsightsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_messages();
        self.render_side_panel(ctx);
        self.render_central_panel(ctx);
        self.render_json_window(ctx);

        if self.processing.is_loading {
            ctx.request_repaint();
        }
    }
}
