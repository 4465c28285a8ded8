//! Configuration loading for planbar.
//!
//! Settings come from a TOML file with a `[style]` section for the widget
//! and a `[demo]` section for the scripted host. Missing keys fall back to
//! defaults.

use config::{Config, ConfigError as SourceError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::widget::StyleConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// The configuration file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(#[from] SourceError),

    /// The configuration file path is invalid.
    #[error("invalid configuration path: {0}")]
    InvalidPath(String),

    /// A value is out of its allowed range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
}

/// Settings of the scripted demo.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Target value
    pub planned: f64,
    /// Starting progress
    pub progress: f64,
    /// Amount added per tick
    pub step: f64,
    /// Delay between ticks in milliseconds
    pub interval_ms: u64,
    /// Duration of the fill animation in milliseconds
    pub animation_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            planned: 1120.0,
            progress: 400.0,
            step: 125.0,
            interval_ms: 2500,
            animation_ms: 500,
        }
    }
}

impl DemoConfig {
    /// Delay between ticks.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Duration of the fill animation.
    pub fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Widget style
    pub style: StyleConfig,
    /// Demo script
    pub demo: DemoConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// Environment variables override file values using the format
    /// `PLANBAR__<SECTION>__<KEY>` (e.g. `PLANBAR__DEMO__STEP=50`).
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be parsed, or
    /// holds values that fail [`validate`](Self::validate).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let path_str = path
            .to_str()
            .ok_or_else(|| ConfigError::InvalidPath(format!("{:?}", path)))?;

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path_str.to_string()));
        }

        let config = Config::builder()
            .add_source(File::new(path_str, FileFormat::Toml))
            .add_source(
                Environment::with_prefix("PLANBAR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Parse configuration from a TOML string, without environment overrides.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let demo = &self.demo;
        finite("demo.planned", demo.planned)?;
        finite("demo.progress", demo.progress)?;
        finite("demo.step", demo.step)?;
        if demo.step <= 0.0 {
            return Err(invalid("demo.step", "must be greater than zero"));
        }

        let style = &self.style;
        for (field, value) in [
            ("style.corner_radius", style.corner_radius),
            ("style.divider_width", style.divider_width),
            ("style.inner_padding", style.inner_padding),
            ("style.bar_height", style.bar_height),
        ] {
            finite(field, value)?;
            if value < 0.0 {
                return Err(invalid(field, "must not be negative"));
            }
        }
        if !(0.0..=1.0).contains(&style.track_opacity) {
            return Err(invalid("style.track_opacity", "must be between 0 and 1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be a finite number"))
    }
}
