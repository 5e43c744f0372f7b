//! Estimators available from the command line.

use dsinsights_core::stats::per_capture_counts;
use dsinsights_core::{
    CaptureSource, Error, Estimator, EstimatorConfig, EstimatorConstructor, EstimatorRegistry,
    Metrics, Result, SystemConfig,
};
use dsinsights_io::MetricsSource;
use serde_json::json;

/// Predicts the mean number of objects per capture for every capture.
///
/// A sanity baseline for counting models: `train` fits the mean on the
/// dataset under `data_root`, `evaluate` scores the prediction against the
/// same captures.
pub struct ObjectCountBaseline {
    definition_id: String,
    mean: Option<f64>,
}

impl ObjectCountBaseline {
    pub const NAME: &'static str = "object_count_baseline";

    fn load_counts(&self, system: &SystemConfig) -> Result<Vec<f64>> {
        let table = MetricsSource::new(&system.data_root, &self.definition_id).load()?;
        #[allow(clippy::cast_precision_loss)]
        let counts = per_capture_counts(&table)
            .into_iter()
            .map(|c| c.count as f64)
            .collect();
        Ok(counts)
    }
}

impl Estimator for ObjectCountBaseline {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn train(&mut self, config: &SystemConfig) -> Result<()> {
        let counts = self.load_counts(config)?;
        if counts.is_empty() {
            return Err(Error::EstimatorError(format!(
                "no captures with objects under {}",
                config.data_root
            )));
        }
        #[allow(clippy::cast_precision_loss)]
        let mean = counts.iter().sum::<f64>() / counts.len() as f64;
        log::info!("{} fitted mean {mean:.3} on {} captures", Self::NAME, counts.len());
        self.mean = Some(mean);
        Ok(())
    }

    fn evaluate(&mut self, config: &SystemConfig) -> Result<Metrics> {
        let mean = self
            .mean
            .ok_or_else(|| Error::EstimatorError(format!("{} is not trained", Self::NAME)))?;
        let counts = self.load_counts(config)?;
        #[allow(clippy::cast_precision_loss)]
        let n = counts.len().max(1) as f64;
        let mae = counts.iter().map(|c| (c - mean).abs()).sum::<f64>() / n;
        let mse = counts.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;
        Ok(Metrics::from([
            ("mean_objects_per_capture".to_string(), mean),
            ("mean_absolute_error".to_string(), mae),
            ("root_mean_squared_error".to_string(), mse.sqrt()),
        ]))
    }
}

fn object_count_baseline(config: &EstimatorConfig) -> Result<Box<dyn Estimator>> {
    let definition_id = config
        .param("definition_id")
        .unwrap_or(dsinsights_core::stats::RENDERED_OBJECT_INFO_DEFINITION_ID)
        .to_string();
    Ok(Box::new(ObjectCountBaseline {
        definition_id,
        mean: None,
    }))
}

/// Builds the registry of command-line estimators.
///
/// # Errors
/// Returns `DuplicateEstimator` if two entries share a name.
pub fn registry() -> Result<EstimatorRegistry> {
    let entries: [(&str, EstimatorConstructor); 1] =
        [(ObjectCountBaseline::NAME, object_count_baseline)];
    EstimatorRegistry::from_table(&entries)
}

/// Formats metrics the way Kubeflow pipelines read them.
#[must_use]
pub fn kfp_metrics(metrics: &Metrics) -> serde_json::Value {
    json!({
        "metrics": metrics
            .iter()
            .map(|(name, value)| json!({
                "name": name.replace('_', "-"),
                "numberValue": value,
                "format": "RAW",
            }))
            .collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_dataset(root: &std::path::Path) {
        let def = dsinsights_core::stats::RENDERED_OBJECT_INFO_DEFINITION_ID;
        let object = |id: u64| {
            format!(
                r#"{{"label_id": 1, "label_name": "cube", "instance_id": {id}, "visible_pixels": 10}}"#
            )
        };
        let metric = |capture: &str, n: u64| {
            let values: Vec<String> = (0..n).map(object).collect();
            format!(
                r#"{{"capture_id": "{capture}", "metric_definition": "{def}", "values": [{}]}}"#,
                values.join(",")
            )
        };
        fs::write(
            root.join("metrics_000.json"),
            format!(r#"{{"metrics": [{}, {}]}}"#, metric("a", 1), metric("b", 3)),
        )
        .unwrap();
    }

    #[test]
    fn test_registry_lists_baseline() {
        let registry = registry().unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["object_count_baseline"]);
    }

    #[test]
    fn test_baseline_train_and_evaluate() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        let system = SystemConfig::new().with_data_root(dir.path().to_string_lossy());

        let mut estimator = registry()
            .unwrap()
            .create("object_count_baseline", &EstimatorConfig::new())
            .unwrap();
        assert!(estimator.evaluate(&system).is_err());
        estimator.train(&system).unwrap();
        let metrics = estimator.evaluate(&system).unwrap();
        assert!((metrics["mean_objects_per_capture"] - 2.0).abs() < 1e-12);
        assert!((metrics["mean_absolute_error"] - 1.0).abs() < 1e-12);

        let kfp = kfp_metrics(&metrics);
        assert_eq!(kfp["metrics"][0]["name"], "mean-absolute-error");
        assert_eq!(kfp["metrics"][0]["format"], "RAW");
    }

    #[test]
    fn test_baseline_missing_dataset() {
        let system = SystemConfig::new().with_data_root("/nonexistent/dsinsights");
        let mut estimator = registry()
            .unwrap()
            .create(ObjectCountBaseline::NAME, &EstimatorConfig::new())
            .unwrap();
        assert!(matches!(estimator.train(&system), Err(Error::Load(_))));
    }
}
