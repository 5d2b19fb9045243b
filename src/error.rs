//! Error types for the Lumicell device model.
//!
//! This module provides a unified error type [`LumicellError`] that covers
//! all error conditions that can occur during parameter loading, rate
//! derivation, and model evaluation.

use thiserror::Error;

/// Result type alias using [`LumicellError`].
pub type Result<T> = std::result::Result<T, LumicellError>;

/// Unified error type for all Lumicell operations.
#[derive(Error, Debug)]
pub enum LumicellError {
    // ============ Configuration Errors ============
    /// A required device parameter is absent from the table
    #[error("Missing required device parameter '{key}'")]
    MissingParameter { key: String },

    /// Attempt to mutate a parameter that was never loaded
    #[error("Unknown device parameter '{key}' - not present in the loaded table")]
    UnknownParameter { key: String },

    /// A parameter value is NaN or infinite
    #[error("Parameter '{key}' has non-finite value {value}")]
    NonFiniteParameter { key: String, value: f64 },

    /// Unknown model name requested from the registry
    #[error("Unknown device model '{name}'")]
    UnknownModel { name: String },

    /// Error reading a configuration or parameter file
    #[error("Failed to read '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing a configuration or parameter file
    #[error("Failed to parse '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    // ============ Computation Errors ============
    /// An RC time constant vanished, so its rate is not finite
    #[error("Rate {rate} is not finite - check the capacitance and resistance feeding it")]
    DegenerateRate { rate: &'static str },

    /// The ABC efficiency denominator vanished
    #[error("ABC efficiency is degenerate (AB = {ab}); efficiency undefined")]
    DegenerateEfficiency { ab: f64 },

    /// Gain inversion with no optical output current
    #[error("Output current is zero or non-finite ({value:.3e} nA); gain ratio undefined")]
    ZeroOutputCurrent { value: f64 },

    // ============ Shape Errors ============
    /// Per-element threshold array does not match the gate-voltage array
    #[error("Threshold override has {actual} elements, expected {expected}")]
    ThresholdShapeMismatch { expected: usize, actual: usize },

    // ============ I/O Errors ============
    /// Error persisting an experiment result record
    #[error("Failed to write result '{path}': {source}")]
    ResultWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl LumicellError {
    /// Create a missing-parameter error
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingParameter { key: key.into() }
    }

    /// Create an unknown-parameter error
    pub fn unknown(key: impl Into<String>) -> Self {
        Self::UnknownParameter { key: key.into() }
    }

    /// Create a non-finite-parameter error
    pub fn non_finite(key: impl Into<String>, value: f64) -> Self {
        Self::NonFiniteParameter {
            key: key.into(),
            value,
        }
    }

    /// Create a config-read error
    pub fn config_read(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ConfigRead {
            path: path.into(),
            source,
        }
    }

    /// Create a config-parse error
    pub fn config_parse(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }
}
