// src/error.rs
//! Unified error handling for the PPG core
//!
//! The numeric pipeline itself never fails: degenerate input (flat or short
//! windows, zero valid sample points, too few valleys) and numeric guards
//! degrade to defined zero results instead. Errors surface only at the
//! configuration and classifier boundaries.

use thiserror::Error;

/// Unified error type for the PPG processing core.
#[derive(Debug, Error)]
pub enum PpgError {
    /// Invalid configuration value for a named component.
    #[error("invalid configuration for {component}: {reason}")]
    Configuration {
        /// Component the offending value belongs to.
        component: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The external signal-quality model failed to load or predict.
    #[error("signal quality model error: {0}")]
    Model(String),

    /// Failed to read a configuration file.
    #[error("configuration i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a configuration file.
    #[error("configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl PpgError {
    /// Shorthand for a configuration error.
    pub fn configuration(component: &str, reason: impl Into<String>) -> Self {
        Self::Configuration {
            component: component.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_display() {
        let error = PpgError::configuration("pipeline", "max_window_len must be positive");
        assert_eq!(
            error.to_string(),
            "invalid configuration for pipeline: max_window_len must be positive"
        );
    }
}
