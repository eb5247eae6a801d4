//! Error types for the smart-money engine.
//!
//! Data gaps never surface here; they are modelled as absent values.
//! These variants cover caller mistakes such as a zero-length window.

use thiserror::Error;

/// Errors raised for invalid arguments or configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// Pattern window must contain at least one day.
    #[error("invalid window size: {0} (must be at least 1)")]
    InvalidWindow(usize),

    /// Outcome horizon must be at least one trading day.
    #[error("invalid horizon: {0} trading days (must be at least 1)")]
    InvalidHorizon(usize),

    /// Sentiment query value is not a finite number.
    #[error("invalid sentiment value: {0}")]
    InvalidSentiment(f64),

    /// Matching tolerance is negative or not finite.
    #[error("invalid tolerance: {0}")]
    InvalidTolerance(f64),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_window_message_names_value() {
        let err = EngineError::InvalidWindow(0);
        assert!(err.to_string().contains("window size: 0"));
    }

    #[test]
    fn config_helper_wraps_message() {
        let err = EngineError::config("bad breakpoints");
        assert_eq!(err, EngineError::InvalidConfig("bad breakpoints".to_string()));
        assert!(err.to_string().contains("bad breakpoints"));
    }
}
