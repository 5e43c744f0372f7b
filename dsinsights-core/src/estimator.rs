//! Estimator trait and name-based factory.
//!
//! An estimator bundles data transforms, a model and the procedures to train
//! and evaluate it. The training loop itself lives in an external framework;
//! this module only defines the seam and an explicit registry that maps a
//! name to a constructor.

use std::collections::BTreeMap;

use crate::config::SystemConfig;
use crate::{Error, Result};

/// Evaluation metrics keyed by metric name.
pub type Metrics = BTreeMap<String, f64>;

/// Parameters passed to an estimator constructor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstimatorConfig {
    /// System-level settings (data root, log directory, workers).
    pub system: SystemConfig,
    /// Estimator specific parameters.
    pub params: BTreeMap<String, String>,
}

impl EstimatorConfig {
    /// Creates a configuration with default system settings and no parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the system configuration.
    #[must_use]
    pub fn with_system(mut self, system: SystemConfig) -> Self {
        self.system = system;
        self
    }

    /// Adds an estimator parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Returns a parameter value.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Parses a parameter, falling back to `default` when absent.
    ///
    /// # Errors
    /// Returns `ConfigError` if the parameter is present but does not parse.
    pub fn parse_param<T: std::str::FromStr>(&self, key: &str, default: T) -> Result<T> {
        match self.param(key) {
            None => Ok(default),
            Some(raw) => raw
                .parse()
                .map_err(|_| Error::ConfigError(format!("invalid value for {key}: {raw}"))),
        }
    }
}

/// Trait for modeling estimators.
pub trait Estimator: Send {
    /// Returns the registry name of the estimator.
    fn name(&self) -> &'static str;

    /// Trains the estimator.
    ///
    /// # Errors
    /// Returns an error if training fails.
    fn train(&mut self, config: &SystemConfig) -> Result<()>;

    /// Evaluates the estimator and returns its metrics.
    ///
    /// # Errors
    /// Returns an error if evaluation fails.
    fn evaluate(&mut self, config: &SystemConfig) -> Result<Metrics>;
}

/// Constructor stored in the registry.
pub type EstimatorConstructor = fn(&EstimatorConfig) -> Result<Box<dyn Estimator>>;

/// Explicit name → constructor mapping, filled at startup.
#[derive(Clone, Default)]
pub struct EstimatorRegistry {
    constructors: BTreeMap<String, EstimatorConstructor>,
}

impl std::fmt::Debug for EstimatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.constructors.keys()).finish()
    }
}

impl EstimatorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a static table of entries.
    ///
    /// # Errors
    /// Returns `DuplicateEstimator` if a name appears twice.
    pub fn from_table(entries: &[(&str, EstimatorConstructor)]) -> Result<Self> {
        let mut registry = Self::new();
        for &(name, constructor) in entries {
            registry.register(name, constructor)?;
        }
        Ok(registry)
    }

    /// Registers a constructor under `name`.
    ///
    /// # Errors
    /// Returns `DuplicateEstimator` if the name is already taken.
    pub fn register(&mut self, name: &str, constructor: EstimatorConstructor) -> Result<()> {
        if self.constructors.contains_key(name) {
            return Err(Error::DuplicateEstimator(name.to_string()));
        }
        log::debug!("registered estimator {name}");
        self.constructors.insert(name.to_string(), constructor);
        Ok(())
    }

    /// Looks up the constructor registered under `name`.
    ///
    /// # Errors
    /// Returns `UnknownEstimator` if nothing is registered under `name`.
    pub fn find(&self, name: &str) -> Result<EstimatorConstructor> {
        self.constructors
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownEstimator(name.to_string()))
    }

    /// Creates a new estimator instance.
    ///
    /// # Errors
    /// Returns `UnknownEstimator` for unregistered names, or the constructor's error.
    pub fn create(&self, name: &str, config: &EstimatorConfig) -> Result<Box<dyn Estimator>> {
        let constructor = self.find(name)?;
        constructor(config)
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Number of registered estimators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Returns true if no estimator is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantBaseline {
        score: f64,
        trained: bool,
    }

    impl Estimator for ConstantBaseline {
        fn name(&self) -> &'static str {
            "ConstantBaseline"
        }

        fn train(&mut self, _config: &SystemConfig) -> Result<()> {
            self.trained = true;
            Ok(())
        }

        fn evaluate(&mut self, _config: &SystemConfig) -> Result<Metrics> {
            if !self.trained {
                return Err(Error::EstimatorError("not trained".to_string()));
            }
            Ok(Metrics::from([("score".to_string(), self.score)]))
        }
    }

    fn constant_baseline(config: &EstimatorConfig) -> Result<Box<dyn Estimator>> {
        Ok(Box::new(ConstantBaseline {
            score: config.parse_param("score", 0.5)?,
            trained: false,
        }))
    }

    #[test]
    fn test_register_and_create() {
        let mut registry = EstimatorRegistry::new();
        registry
            .register("ConstantBaseline", constant_baseline)
            .unwrap();
        assert!(registry.contains("ConstantBaseline"));

        let config = EstimatorConfig::new().with_param("score", "0.75");
        let mut estimator = registry.create("ConstantBaseline", &config).unwrap();
        assert_eq!(estimator.name(), "ConstantBaseline");

        let system = SystemConfig::new();
        assert!(estimator.evaluate(&system).is_err());
        estimator.train(&system).unwrap();
        let metrics = estimator.evaluate(&system).unwrap();
        assert!((metrics["score"] - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_estimator() {
        let registry = EstimatorRegistry::new();
        assert!(registry.is_empty());
        let err = registry
            .create("FasterRCNN", &EstimatorConfig::new())
            .err()
            .unwrap();
        assert!(matches!(err, Error::UnknownEstimator(name) if name == "FasterRCNN"));
    }

    #[test]
    fn test_duplicate_registration() {
        let constructor: EstimatorConstructor = constant_baseline;
        let result = EstimatorRegistry::from_table(&[
            ("ConstantBaseline", constructor),
            ("ConstantBaseline", constructor),
        ]);
        assert!(matches!(result, Err(Error::DuplicateEstimator(_))));
    }

    #[test]
    fn test_invalid_param() {
        let mut registry = EstimatorRegistry::new();
        registry.register("Baseline", constant_baseline).unwrap();
        let config = EstimatorConfig::new().with_param("score", "high");
        assert!(matches!(
            registry.create("Baseline", &config),
            Err(Error::ConfigError(_))
        ));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Baseline"]);
        assert_eq!(registry.len(), 1);
    }
}
