// src/config/mod.rs
//! Pipeline configuration with serde field defaults and TOML loading

use crate::acquisition::CombinationMode;
use crate::error::PpgError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable parameters of the processing pipeline.
///
/// Every field carries a default, so a partial TOML file (or an empty one)
/// yields a usable configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Active channel combination mode.
    #[serde(default)]
    pub combination_mode: CombinationMode,

    /// Maximum samples retained in the rolling window.
    #[serde(default = "defaults::max_window_len")]
    pub max_window_len: usize,

    /// Window length below which analysis does not run.
    #[serde(default = "defaults::min_analysis_len")]
    pub min_analysis_len: usize,

    /// Frame-rate estimate used until the first measured span completes.
    #[serde(default = "defaults::initial_fps")]
    pub initial_fps: f32,

    /// Weight of the previous estimate in the exponential frame-rate
    /// smoothing, in [0, 1).
    #[serde(default = "defaults::fps_smoothing")]
    pub fps_smoothing: f32,

    /// Assumed sampling rate for the spectral feature, in Hz.
    #[serde(default = "defaults::feature_sample_rate_hz")]
    pub feature_sample_rate_hz: f32,
}

mod defaults {
    pub fn max_window_len() -> usize {
        300
    }

    pub fn min_analysis_len() -> usize {
        100
    }

    pub fn initial_fps() -> f32 {
        30.0
    }

    pub fn fps_smoothing() -> f32 {
        0.7
    }

    pub fn feature_sample_rate_hz() -> f32 {
        100.0
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            combination_mode: CombinationMode::default(),
            max_window_len: defaults::max_window_len(),
            min_analysis_len: defaults::min_analysis_len(),
            initial_fps: defaults::initial_fps(),
            fps_smoothing: defaults::fps_smoothing(),
            feature_sample_rate_hz: defaults::feature_sample_rate_hz(),
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a TOML file; missing fields take defaults.
    pub fn from_toml_path(path: impl AsRef<Path>) -> Result<Self, PpgError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), PpgError> {
        if self.min_analysis_len < 2 {
            return Err(PpgError::configuration(
                "pipeline",
                "min_analysis_len must be at least 2",
            ));
        }
        if self.max_window_len < self.min_analysis_len {
            return Err(PpgError::configuration(
                "pipeline",
                "max_window_len must be >= min_analysis_len",
            ));
        }
        if !self.initial_fps.is_finite() || self.initial_fps <= 0.0 {
            return Err(PpgError::configuration(
                "pipeline",
                "initial_fps must be positive",
            ));
        }
        if !(0.0..1.0).contains(&self.fps_smoothing) {
            return Err(PpgError::configuration(
                "pipeline",
                "fps_smoothing must be in [0, 1)",
            ));
        }
        if !self.feature_sample_rate_hz.is_finite() || self.feature_sample_rate_hz <= 0.0 {
            return Err(PpgError::configuration(
                "pipeline",
                "feature_sample_rate_hz must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_window_len, 300);
        assert_eq!(config.min_analysis_len, 100);
        assert_eq!(config.combination_mode, CombinationMode::Default);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "combination_mode = \"redOnly\"").unwrap();
        writeln!(file, "max_window_len = 150").unwrap();

        let config = PipelineConfig::from_toml_path(file.path()).unwrap();
        assert_eq!(config.combination_mode, CombinationMode::RedOnly);
        assert_eq!(config.max_window_len, 150);
        assert_eq!(config.min_analysis_len, 100);
        assert_eq!(config.initial_fps, 30.0);
    }

    #[test]
    fn inconsistent_toml_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_window_len = 10").unwrap();

        assert!(PipelineConfig::from_toml_path(file.path()).is_err());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = PipelineConfig::default();
        config.fps_smoothing = 1.0;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.initial_fps = 0.0;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.min_analysis_len = 1;
        assert!(config.validate().is_err());
    }
}
