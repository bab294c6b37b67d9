//! Lookback time as a function of redshift

use kea_core::math::quadrature::{integrate, QuadratureOptions};
use kea_core::{Cosmology, Error, Result};

/// Lookback time in Gyr to redshift `z`
///
/// Integrates `1 / ((1+x) E(x))` from 0 to `z` and scales by the Hubble
/// time. `z = 0` gives exactly zero.
///
/// # Examples
///
/// ```rust
/// use kea_core::Cosmology;
/// use kea_cosmology::lookback_time;
///
/// let cosmology = Cosmology::millennium();
/// assert_eq!(lookback_time(&cosmology, 0.0).unwrap(), 0.0);
///
/// let t = lookback_time(&cosmology, 1.0).unwrap();
/// assert!(t > 7.0 && t < 9.0);
/// ```
pub fn lookback_time(cosmology: &Cosmology, z: f64) -> Result<f64> {
    if !(z >= 0.0 && z.is_finite()) {
        return Err(Error::InvalidParameter(format!(
            "redshift must be finite and non-negative, got {z}"
        )));
    }

    let integrand = |x: f64| 1.0 / ((1.0 + x) * cosmology.expansion(x));
    let result = integrate(integrand, 0.0, z, &QuadratureOptions::default())?;
    Ok(cosmology.hubble_time_gyr() * result.value)
}

/// Age of the universe in Gyr: the lookback time to very high redshift
pub fn age_of_universe(cosmology: &Cosmology) -> Result<f64> {
    // Substituting a = 1/(1+x) keeps the integral on a finite interval
    let integrand = |a: f64| {
        if a == 0.0 {
            return 0.0;
        }
        let z = 1.0 / a - 1.0;
        1.0 / (a * cosmology.expansion(z))
    };
    let result = integrate(integrand, 0.0, 1.0, &QuadratureOptions::default())?;
    Ok(cosmology.hubble_time_gyr() * result.value)
}
