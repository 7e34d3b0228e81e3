use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    tools::Position,
};

/// Main configuration for the viral-clip-editor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Edit pipeline settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Frame loading settings (CLI only)
    #[serde(default)]
    pub loader: LoaderConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.pipeline.validate()?;
        self.loader.validate()?;
        Ok(())
    }
}

/// Edit pipeline configuration
///
/// `fps` is the conversion constant between seconds and frame indices for the
/// whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Sampling rate of the frame sequence
    pub fps: f64,

    /// Deadline for a single external frame edit, in seconds
    pub edit_timeout_secs: u64,

    /// Overlay duration used when an action omits it (seconds)
    pub default_overlay_duration: f64,

    /// Overlay position used when an action omits it (percent from top-left)
    pub default_overlay_position: Position,

    /// Gap kept between a clamped start time and the end of the sequence (seconds)
    pub tail_margin: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fps: 10.0,
            edit_timeout_secs: 120,
            default_overlay_duration: 2.0,
            default_overlay_position: Position::default(),
            tail_margin: 0.1,
        }
    }
}

impl PipelineConfig {
    fn validate(&self) -> Result<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "pipeline.fps".to_string(),
                value: self.fps.to_string()
            }.into());
        }

        if self.edit_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "pipeline.edit_timeout_secs".to_string(),
                value: self.edit_timeout_secs.to_string()
            }.into());
        }

        if !(self.default_overlay_duration > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "pipeline.default_overlay_duration".to_string(),
                value: self.default_overlay_duration.to_string()
            }.into());
        }

        if !(self.tail_margin >= 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "pipeline.tail_margin".to_string(),
                value: self.tail_margin.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Frame loading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Number of threads used to read and encode frame files
    pub threads: usize,

    /// File extensions accepted as frames
    pub extensions: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            extensions: ["png", "jpg", "jpeg", "webp", "bmp"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl LoaderConfig {
    fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(ConfigError::InvalidValue {
                key: "loader.threads".to_string(),
                value: self.threads.to_string()
            }.into());
        }

        if self.extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "loader.extensions".to_string(),
                value: "[]".to_string()
            }.into());
        }

        Ok(())
    }
}
