//! Error types for event-rate calculations
//!
//! Provides a unified error type for all kea crates.

use thiserror::Error;

/// Core error type for binned rate computations
#[derive(Error, Debug)]
pub enum Error {
    /// A lookup or integration bound fell outside the histogram range
    #[error("Value {value} outside of range [{low}, {high}]")]
    OutOfRange { value: f64, low: f64, high: f64 },

    /// Array lengths do not agree
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Bin edges or abscissae are not strictly increasing
    #[error("Values must be strictly increasing: {0}")]
    NonMonotonic(String),

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Configuration could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a value outside `[low, high]`
    pub fn out_of_range(value: f64, low: f64, high: f64) -> Self {
        Self::OutOfRange { value, low, high }
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch { expected, actual }
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} contains NaN or infinite values"))
    }

    /// Check that `values` is strictly increasing
    pub fn check_increasing(values: &[f64], context: &str) -> Result<()> {
        if let Some(i) = values.windows(2).position(|w| !(w[0] < w[1])) {
            return Err(Self::NonMonotonic(format!(
                "{context} at index {}: {} >= {}",
                i + 1,
                values[i],
                values[i + 1]
            )));
        }
        Ok(())
    }
}
