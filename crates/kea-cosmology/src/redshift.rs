//! Inverting lookback time to redshift
//!
//! There is no closed form for z(t_L), so the redshift is found by Brent's
//! bounded minimisation of `|lookback_time(z) - t_L|`. This only feeds display axes,
//! so running out of evaluations returns the best estimate with a warning
//! rather than failing.

use std::sync::atomic::{AtomicUsize, Ordering};

use argmin::core::{CostFunction, Executor, State, TerminationReason, TerminationStatus};
use argmin::solver::brent::BrentOpt;
use tracing::{debug, instrument, warn};

use kea_core::{Cosmology, Error, RedshiftSearch, Result};

use crate::lookback::lookback_time;

/// `|lookback_time(z) - target|` as an argmin cost
struct LookbackResidual<'a> {
    cosmology: &'a Cosmology,
    target_gyr: f64,
    evaluations: &'a AtomicUsize,
}

impl CostFunction for LookbackResidual<'_> {
    type Param = f64;
    type Output = f64;

    fn cost(&self, z: &Self::Param) -> std::result::Result<Self::Output, argmin::core::Error> {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        lookback_time(self.cosmology, *z)
            .map(|t| (t - self.target_gyr).abs())
            .map_err(|e| argmin::core::Error::msg(e.to_string()))
    }
}

/// Best redshift found for a lookback time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RedshiftEstimate {
    /// Redshift estimate
    pub z: f64,
    /// `|lookback_time(z) - target|` in Gyr
    pub residual_gyr: f64,
    /// Lookback-time evaluations used
    pub evaluations: usize,
    /// False when the evaluation budget ran out
    pub converged: bool,
}

/// Redshift at which the lookback time equals `lookback_gyr`
///
/// Uses the default search window `[1e-8, 1000]` with tolerance 1e-8.
///
/// # Examples
///
/// ```rust
/// use kea_core::Cosmology;
/// use kea_cosmology::{approximate_redshift, lookback_time};
///
/// let cosmology = Cosmology::millennium();
/// let t = lookback_time(&cosmology, 2.0).unwrap();
/// let z = approximate_redshift(&cosmology, t).unwrap();
/// assert!((z - 2.0).abs() < 1e-6);
/// ```
pub fn approximate_redshift(cosmology: &Cosmology, lookback_gyr: f64) -> Result<f64> {
    Ok(approximate_redshift_with(cosmology, &RedshiftSearch::default(), lookback_gyr)?.z)
}

/// Like [`approximate_redshift`] with an explicit search window, returning diagnostics
pub fn approximate_redshift_with(
    cosmology: &Cosmology,
    search: &RedshiftSearch,
    lookback_gyr: f64,
) -> Result<RedshiftEstimate> {
    if !lookback_gyr.is_finite() {
        return Err(Error::non_finite("lookback time"));
    }
    cosmology.validate()?;
    search.validate()?;

    let evaluations = AtomicUsize::new(0);
    let problem = LookbackResidual {
        cosmology,
        target_gyr: lookback_gyr,
        evaluations: &evaluations,
    };
    // Brent spends one evaluation before its first iteration
    let max_iters = search.max_evaluations.saturating_sub(1) as u64;
    let solver = BrentOpt::new(search.z_min, search.z_max)
        .set_tolerance(f64::EPSILON.sqrt(), search.tolerance);

    let res = Executor::new(problem, solver)
        .configure(|state| state.max_iters(max_iters))
        .run()
        .map_err(|e| Error::Computation(format!("redshift search failed: {e}")))?;

    let state = res.state();
    let z = state
        .get_best_param()
        .copied()
        .ok_or_else(|| Error::Computation("redshift search produced no estimate".to_string()))?;
    let residual_gyr = state.get_best_cost();
    let evaluations = evaluations.load(Ordering::Relaxed);
    let converged = matches!(
        state.get_termination_status(),
        TerminationStatus::Terminated(TerminationReason::SolverConverged)
    );

    if !converged {
        warn!(
            "redshift search for lookback {:.6} Gyr stopped after {} evaluations (z={:.8}, residual={:.3e}): {}",
            lookback_gyr,
            evaluations,
            z,
            residual_gyr,
            state.get_termination_status()
        );
    }

    Ok(RedshiftEstimate {
        z,
        residual_gyr,
        evaluations,
        converged,
    })
}

/// Map lookback-time edges (Gyr) onto a redshift axis
///
/// A lookback time of exactly zero maps to redshift zero.
#[instrument(skip(cosmology, search, lookback_edges), fields(n = lookback_edges.len()))]
pub fn redshift_edges(
    cosmology: &Cosmology,
    search: &RedshiftSearch,
    lookback_edges: &[f64],
) -> Result<Vec<f64>> {
    let edges = lookback_edges
        .iter()
        .map(|&t| {
            if t == 0.0 {
                Ok(0.0)
            } else {
                approximate_redshift_with(cosmology, search, t).map(|e| e.z)
            }
        })
        .collect::<Result<Vec<_>>>()?;
    debug!("Mapped {} lookback edges to redshift", edges.len());
    Ok(edges)
}
