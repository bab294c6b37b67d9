//! Core types and numerical building blocks for event-rate calculations
//!
//! This crate provides what every other kea crate shares: the unified
//! error type, run configuration, the interpolation capability the rate
//! engine consumes, and the quadrature needed for cosmological time
//! conversions.
//!
//! # Example
//!
//! ```rust
//! use kea_core::{FitInterpolant, Interpolant, LinearSpline};
//!
//! // Star-formation rate density sampled at three lookback times (yr)
//! let sfrd = LinearSpline::fit(&[0.0, 5e9, 1e10], &[0.01, 0.05, 0.02]).unwrap();
//!
//! // Mass formed per unit volume between 1 and 2 Gyr ago
//! let mass = sfrd.definite_integral(1e9, 2e9);
//! assert!(mass > 0.0);
//! ```

pub mod config;
pub mod error;
pub mod interpolate;
pub mod math;
pub mod utils;

// Re-export core types
pub use config::{Cosmology, RateConfig, RedshiftSearch, SimulationVolume, NOW_GYR};
pub use error::{Error, Result};
pub use interpolate::{FitInterpolant, Interpolant, LinearSpline};
