//! Configuration management for bucketfs
//!
//! Defaults are layered under an optional `bucketfs.toml` and `BUCKETFS_*`
//! environment variables, e.g. `BUCKETFS_RETRY__MAX_RETRIES=3`.

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use std::time::Duration;

use crate::backoff::ExponentialBackOff;

/// Complete connector configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ConnectorConfig {
    /// URI scheme the filesystem answers to, e.g. `gs`
    pub scheme: String,

    /// Initial working directory for relative paths
    pub working_directory: String,

    pub retry: RetrySettings,
}

/// Backoff settings for object store calls
#[derive(Debug, Deserialize, Clone)]
pub struct RetrySettings {
    /// Retries after the first attempt. Negative values are rejected when
    /// the backoff is built.
    pub max_retries: i32,

    pub initial_interval_ms: u64,
    pub multiplier: f64,
    pub randomization_factor: f64,
    pub max_interval_ms: u64,

    /// Give up after this long regardless of attempts left
    #[serde(default)]
    pub max_elapsed_ms: Option<u64>,
}

impl ConnectorConfig {
    /// Load configuration from bucketfs.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Self::builder_with_defaults()?
            .add_source(File::with_name("bucketfs").required(false))
            .add_source(
                Environment::with_prefix("BUCKETFS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::finish(settings)
    }

    /// Defaults overlaid with a TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        let settings = Self::builder_with_defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        Self::finish(settings)
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        let defaults = RetrySettings::default();
        Config::builder()
            .set_default("scheme", "gs")?
            .set_default("working_directory", "/")?
            .set_default("retry.max_retries", i64::from(defaults.max_retries))?
            .set_default("retry.initial_interval_ms", defaults.initial_interval_ms as i64)?
            .set_default("retry.multiplier", defaults.multiplier)?
            .set_default("retry.randomization_factor", defaults.randomization_factor)?
            .set_default("retry.max_interval_ms", defaults.max_interval_ms as i64)
    }

    fn finish(settings: Config) -> Result<Self, config::ConfigError> {
        let config: ConnectorConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.scheme.is_empty()
            || !self.scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            || !self.scheme.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(config::ConfigError::Message(format!(
                "scheme must be alphanumeric and start with a letter, got '{}'",
                self.scheme
            )));
        }

        if self.working_directory.is_empty() {
            return Err(config::ConfigError::Message(
                "working_directory cannot be empty".into(),
            ));
        }

        self.retry.validate()
    }
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            scheme: "gs".to_string(),
            working_directory: "/".to_string(),
            retry: RetrySettings::default(),
        }
    }
}

impl RetrySettings {
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.initial_interval_ms == 0 {
            return Err(config::ConfigError::Message(
                "retry.initial_interval_ms must be greater than 0".into(),
            ));
        }

        if !self.multiplier.is_finite() || self.multiplier < 1.0 {
            return Err(config::ConfigError::Message(
                "retry.multiplier must be at least 1.0".into(),
            ));
        }

        if !(0.0..1.0).contains(&self.randomization_factor) {
            return Err(config::ConfigError::Message(
                "retry.randomization_factor must be in [0, 1)".into(),
            ));
        }

        if self.max_interval_ms < self.initial_interval_ms {
            return Err(config::ConfigError::Message(
                "retry.max_interval_ms must not be less than retry.initial_interval_ms".into(),
            ));
        }

        Ok(())
    }

    /// Unbounded exponential backoff described by these settings
    pub fn exponential_backoff(&self) -> ExponentialBackOff {
        ExponentialBackOff::builder()
            .initial_interval(Duration::from_millis(self.initial_interval_ms))
            .multiplier(self.multiplier)
            .randomization_factor(self.randomization_factor)
            .max_interval(Duration::from_millis(self.max_interval_ms))
            .max_elapsed_time(self.max_elapsed_ms.map(Duration::from_millis))
            .build()
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 10,
            initial_interval_ms: 500,
            multiplier: 1.5,
            randomization_factor: 0.5,
            max_interval_ms: 60_000,
            max_elapsed_ms: None,
        }
    }
}
