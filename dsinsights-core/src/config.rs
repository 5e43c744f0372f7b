//! System configuration shared by command-line tools and estimators.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Placeholder for unset string options.
pub const NULL_STRING: &str = "None";
/// Default dataset location inside training containers.
pub const DEFAULT_DATA_ROOT: &str = "/data";
/// Default directory for pipeline metrics output.
pub const DEFAULT_KFP_METRICS_DIR: &str = "/kfp_metrics";
/// Default pipeline metrics file name.
pub const DEFAULT_KFP_METRICS_FILENAME: &str = "mlpipeline-metrics.json";

/// System-level configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[allow(clippy::struct_excessive_bools)]
pub struct SystemConfig {
    /// Log directory for runs.
    pub logdir: String,
    /// Directory pipeline metrics are written to.
    pub metricsdir: String,
    /// File name of the pipeline metrics file.
    pub metricsfilename: String,
    /// Root directory of the dataset.
    pub data_root: String,
    /// Verbose logging.
    pub verbose: bool,
    /// Validate configuration without running.
    pub dryrun: bool,
    /// Disable GPU usage.
    pub no_cuda: bool,
    /// Number of data loading workers (0 = main thread).
    pub workers: usize,
    /// Validate every N epochs.
    pub val_interval: usize,
    /// Authorization token for simulation downloads.
    pub auth_token: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            logdir: NULL_STRING.to_string(),
            metricsdir: DEFAULT_KFP_METRICS_DIR.to_string(),
            metricsfilename: DEFAULT_KFP_METRICS_FILENAME.to_string(),
            data_root: DEFAULT_DATA_ROOT.to_string(),
            verbose: false,
            dryrun: false,
            no_cuda: false,
            workers: 0,
            val_interval: 1,
            auth_token: NULL_STRING.to_string(),
        }
    }
}

impl SystemConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dataset root.
    #[must_use]
    pub fn with_data_root(mut self, data_root: impl Into<String>) -> Self {
        self.data_root = data_root.into();
        self
    }

    /// Sets the log directory.
    #[must_use]
    pub fn with_logdir(mut self, logdir: impl Into<String>) -> Self {
        self.logdir = logdir.into();
        self
    }

    /// Enables or disables verbose logging.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Sets the number of data loading workers.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the validation interval in epochs.
    #[must_use]
    pub fn with_val_interval(mut self, interval: usize) -> Self {
        self.val_interval = interval;
        self
    }

    /// Returns the full path of the pipeline metrics file.
    #[must_use]
    pub fn metrics_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.metricsdir).join(&self.metricsfilename)
    }

    /// Returns true if `logdir` has been set.
    #[must_use]
    pub fn has_logdir(&self) -> bool {
        self.logdir != NULL_STRING && !self.logdir.is_empty()
    }

    /// Checks option invariants.
    ///
    /// # Errors
    /// Returns `ConfigError` if `val_interval` is zero or `data_root` is empty.
    pub fn validate(&self) -> crate::Result<()> {
        if self.val_interval == 0 {
            return Err(crate::Error::ConfigError(
                "val_interval must be at least 1".to_string(),
            ));
        }
        if self.data_root.is_empty() {
            return Err(crate::Error::ConfigError(
                "data_root must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Reads a configuration from a JSON file. Missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, decoded or validated.
    #[cfg(feature = "serde")]
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_config_defaults() {
        let config = SystemConfig::new();
        assert_eq!(config.data_root, "/data");
        assert_eq!(config.val_interval, 1);
        assert_eq!(config.workers, 0);
        assert!(!config.has_logdir());
        assert_eq!(
            config.metrics_path(),
            std::path::PathBuf::from("/kfp_metrics/mlpipeline-metrics.json")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_system_config_builders() {
        let config = SystemConfig::new()
            .with_data_root("/tmp/dataset")
            .with_logdir("runs/20240101")
            .with_verbose(true)
            .with_workers(4)
            .with_val_interval(2);

        assert_eq!(config.data_root, "/tmp/dataset");
        assert!(config.has_logdir());
        assert!(config.verbose);
        assert_eq!(config.workers, 4);
        assert_eq!(config.val_interval, 2);
    }

    #[test]
    fn test_system_config_validation() {
        assert!(SystemConfig::new().with_val_interval(0).validate().is_err());
        assert!(SystemConfig::new().with_data_root("").validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_system_config_from_json() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"data_root": "/mnt/synth", "workers": 8}}"#).unwrap();
        file.flush().unwrap();

        let config = SystemConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.data_root, "/mnt/synth");
        assert_eq!(config.workers, 8);
        assert_eq!(config.val_interval, 1);
    }
}
