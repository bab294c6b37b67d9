//! Configuration types for event-rate calculations

use serde::{Deserialize, Serialize};

use crate::utils::linspace;
use crate::{Error, Result};

/// Seconds per year used when converting the Hubble time
pub const SECONDS_PER_YEAR: f64 = 60.0 * 60.0 * 24.0 * 365.238_852_6;

/// Kilometres in one megaparsec
pub const KM_PER_MPC: f64 = 3.085_677_581_491_367e19;

/// Age of the universe used as the upper edge of output axes (Gyr)
pub const NOW_GYR: f64 = 13.799;

/// Background cosmology for lookback-time conversions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cosmology {
    /// Matter density parameter
    pub omega_m: f64,
    /// Curvature density parameter
    pub omega_k: f64,
    /// Dark-energy density parameter
    pub omega_lambda: f64,
    /// Hubble time `1/H0` in seconds
    pub hubble_time_s: f64,
}

impl Cosmology {
    /// Parameters of the Millennium simulation (WMAP1, h = 0.73)
    pub fn millennium() -> Self {
        Self::from_hubble_constant(0.25, 0.0, 0.75, 73.0)
    }

    /// Build from density parameters and `H0` in km/s/Mpc
    pub fn from_hubble_constant(omega_m: f64, omega_k: f64, omega_lambda: f64, h0: f64) -> Self {
        Self {
            omega_m,
            omega_k,
            omega_lambda,
            hubble_time_s: KM_PER_MPC / h0,
        }
    }

    /// Hubble time in Gyr
    pub fn hubble_time_gyr(&self) -> f64 {
        self.hubble_time_s / (SECONDS_PER_YEAR * 1e9)
    }

    /// Dimensionless expansion rate `E(z)`
    pub fn expansion(&self, z: f64) -> f64 {
        let a = 1.0 + z;
        (self.omega_m * a.powi(3) + self.omega_k * a.powi(2) + self.omega_lambda).sqrt()
    }

    /// Reject parameters that make `E(z)` undefined at z = 0
    pub fn validate(&self) -> Result<()> {
        if !(self.hubble_time_s > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "hubble time must be positive, got {}",
                self.hubble_time_s
            )));
        }
        if !(self.omega_m + self.omega_k + self.omega_lambda > 0.0) {
            return Err(Error::InvalidParameter(
                "density parameters must sum to a positive value".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Cosmology {
    fn default() -> Self {
        Self::millennium()
    }
}

/// Search window for inverting lookback time to redshift
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedshiftSearch {
    /// Lower redshift bound
    pub z_min: f64,
    /// Upper redshift bound
    pub z_max: f64,
    /// Absolute tolerance on z
    pub tolerance: f64,
    /// Maximum number of lookback-time evaluations
    pub max_evaluations: usize,
}

impl Default for RedshiftSearch {
    fn default() -> Self {
        Self {
            z_min: 1e-8,
            z_max: 1000.0,
            tolerance: 1e-8,
            max_evaluations: 500,
        }
    }
}

impl RedshiftSearch {
    pub fn validate(&self) -> Result<()> {
        if !(self.z_min >= 0.0 && self.z_min < self.z_max) {
            return Err(Error::InvalidParameter(format!(
                "redshift bounds must satisfy 0 <= z_min < z_max, got [{}, {}]",
                self.z_min, self.z_max
            )));
        }
        if !(self.tolerance > 0.0) || self.max_evaluations == 0 {
            return Err(Error::InvalidParameter(
                "redshift search needs a positive tolerance and evaluation budget".to_string(),
            ));
        }
        Ok(())
    }
}

/// Comoving volume of the cosmological simulation box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationVolume {
    /// Box side length in Mpc/h
    pub box_length: f64,
    /// Dimensionless Hubble parameter
    pub hubble_param: f64,
}

impl Default for SimulationVolume {
    fn default() -> Self {
        Self {
            box_length: 62.5,
            hubble_param: 0.73,
        }
    }
}

impl SimulationVolume {
    /// Volume in Mpc^3
    pub fn mpc3(&self) -> f64 {
        (self.box_length / self.hubble_param).powi(3)
    }
}

/// Top-level settings for an event-rate run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateConfig {
    /// Number of output lookback-time bins
    pub nr_bins: usize,
    /// Upper edge of the output axis in Gyr
    pub now_gyr: f64,
    pub cosmology: Cosmology,
    pub redshift: RedshiftSearch,
    pub volume: SimulationVolume,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            nr_bins: 100,
            now_gyr: NOW_GYR,
            cosmology: Cosmology::default(),
            redshift: RedshiftSearch::default(),
            volume: SimulationVolume::default(),
        }
    }
}

impl RateConfig {
    /// Parse from JSON; missing fields take their defaults
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kea_core::config::RateConfig;
    ///
    /// let config = RateConfig::from_json(r#"{ "nr_bins": 50 }"#).unwrap();
    /// assert_eq!(config.nr_bins, 50);
    /// assert_eq!(config.now_gyr, 13.799);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.nr_bins == 0 {
            return Err(Error::InvalidParameter("nr_bins must be positive".to_string()));
        }
        if !(self.now_gyr > 0.0 && self.now_gyr.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "now_gyr must be positive, got {}",
                self.now_gyr
            )));
        }
        if !(self.volume.box_length > 0.0 && self.volume.hubble_param > 0.0) {
            return Err(Error::InvalidParameter(
                "simulation volume must be positive".to_string(),
            ));
        }
        self.cosmology.validate()?;
        self.redshift.validate()
    }

    /// Output lookback-time edges `[0, now]` in Gyr
    pub fn output_edges(&self) -> Vec<f64> {
        linspace(0.0, self.now_gyr, self.nr_bins + 1)
    }
}
