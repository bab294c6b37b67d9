//! Stellar mass formed per output time bin

use kea_core::{Error, Interpolant, Result};

/// Mass formed in each bin of `edges_gyr` by an SFR density history
///
/// `sfrd` is a function of lookback time in years, so every bin is
/// integrated over `[edge[i] * 1e9, edge[i+1] * 1e9]`. The result has one
/// entry per bin and is not normalised any further.
///
/// # Examples
///
/// ```rust
/// use kea_core::{FitInterpolant, LinearSpline};
/// use kea_rates::calculate_mass_per_bin;
///
/// // Constant 0.1 Msun/yr/Mpc^3 over the past 10 Gyr
/// let sfrd = LinearSpline::fit(&[0.0, 1e10], &[0.1, 0.1]).unwrap();
/// let mass = calculate_mass_per_bin(&[0.0, 2.0, 10.0], &sfrd).unwrap();
/// assert!((mass[0] - 2e8).abs() < 1e-3);
/// assert!((mass[1] - 8e8).abs() < 1e-3);
/// ```
pub fn calculate_mass_per_bin<I: Interpolant + ?Sized>(edges_gyr: &[f64], sfrd: &I) -> Result<Vec<f64>> {
    if edges_gyr.len() < 2 {
        return Err(Error::InvalidInput(format!(
            "need at least 2 time edges, got {}",
            edges_gyr.len()
        )));
    }
    Error::check_increasing(edges_gyr, "time edges")?;

    Ok(edges_gyr
        .windows(2)
        .map(|w| sfrd.definite_integral(w[0] * 1e9, w[1] * 1e9))
        .collect())
}
