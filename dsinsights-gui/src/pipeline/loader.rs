//! Dataset loading worker.
//!
//! Discovers the metrics files of a dataset, loads the rendered object
//! table and renders the initial overview in a background thread.

use std::path::Path;
use std::sync::mpsc::Sender;
use std::time::Instant;

use anyhow::{bail, Context};
use dsinsights_charts::{OverviewConfig, OverviewSession};
use dsinsights_io::{discover_metrics_files, MetricsSource};

use crate::message::AppMessage;

/// Main entry point for dataset loading in a background thread.
///
/// Sends progress, then either `LoadComplete` or `LoadError`.
pub fn load_dataset_worker(data_root: &Path, config: OverviewConfig, tx: &Sender<AppMessage>) {
    let start = Instant::now();
    match build_session(data_root, config, tx) {
        Ok(session) => {
            let _ = tx.send(AppMessage::LoadComplete(Box::new(session), start.elapsed()));
        }
        Err(e) => {
            log::error!("failed to load {}: {e:#}", data_root.display());
            let _ = tx.send(AppMessage::LoadError(format!("{e:#}")));
        }
    }
}

fn build_session(
    data_root: &Path,
    config: OverviewConfig,
    tx: &Sender<AppMessage>,
) -> anyhow::Result<OverviewSession<MetricsSource>> {
    let _ = tx.send(AppMessage::LoadProgress(
        0.1,
        "Scanning for metrics files...".to_string(),
    ));
    let files = discover_metrics_files(data_root)
        .with_context(|| format!("cannot read dataset at {}", data_root.display()))?;
    if files.is_empty() {
        bail!("no metrics_*.json files under {}", data_root.display());
    }

    let _ = tx.send(AppMessage::LoadProgress(
        0.3,
        format!("Parsing {} metrics files and rendering charts...", files.len()),
    ));
    let source = MetricsSource::new(data_root, config.definition_id.as_str());
    OverviewSession::init(source, config).context("failed to build overview")
}
