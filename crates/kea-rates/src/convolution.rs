//! Triangular convolution of formed mass with a delay-time distribution
//!
//! Mass formed in output bin `b` (ending at lookback time `t = edges[b+1]`)
//! contributes to every bin `j <= b`: the population has aged by between
//! `t - edges[j+1]` and `t - edges[j]` when bin `j` is observed, so the DTD
//! is integrated over exactly that age window. Afterwards the accumulated
//! counts are divided by the output bin widths and scaled by 1e9.
//!
//! All functions come in an accumulate form, which returns the
//! un-normalised events per bin, and a `calculate` form returning the
//! normalised rate [`Histogram`].

use tracing::{debug, instrument};

use kea_core::{Error, Interpolant, Result};
use kea_histogram::{BinnedIntegral, Histogram};

use crate::metallicity::MetallicityGrid;

/// Events per bin before width normalisation
///
/// # Examples
///
/// ```rust
/// use kea_histogram::Histogram;
/// use kea_rates::accumulate_events;
///
/// let dtd = Histogram::new(vec![0.0, 1.0, 2.0, 3.0], vec![2.0, 2.0, 2.0]).unwrap();
/// let events = accumulate_events(&[0.0, 1.0, 2.0, 3.0], &[0.0, 0.0, 10.0], &dtd).unwrap();
/// assert_eq!(events, vec![20.0, 20.0, 20.0]);
/// ```
pub fn accumulate_events<D: BinnedIntegral + ?Sized>(
    edges: &[f64],
    mass_per_bin: &[f64],
    dtd: &D,
) -> Result<Vec<f64>> {
    check_binning(edges, mass_per_bin)?;
    let mut events = vec![0.0; mass_per_bin.len()];
    for b in 0..mass_per_bin.len() {
        accumulate_bin(&mut events, edges, b, mass_per_bin[b], dtd)?;
    }
    Ok(events)
}

/// Event rate per output bin
///
/// The result has `edges` as its binning. The per-Gpc^3 rescale is a
/// separate step, see [`to_per_gpc3`].
#[instrument(skip(edges, mass_per_bin, dtd), fields(n_bins = mass_per_bin.len()))]
pub fn calculate_event_rates<D: BinnedIntegral + ?Sized>(
    edges: &[f64],
    mass_per_bin: &[f64],
    dtd: &D,
) -> Result<Histogram> {
    let events = accumulate_events(edges, mass_per_bin, dtd)?;
    normalize_event_rates(edges, events)
}

/// Events per bin, selecting the DTD by the metallicity at formation
///
/// For every formation bin `b` the metallicity history (a function of
/// lookback time in years) is evaluated at the bin's edges, and
/// `|Z(e_{b+1}) - Z(e_b)| / 2` is mapped through `grid` to pick one of
/// `dtds`, ordered by metallicity index. The choice holds for every
/// contribution of that bin.
pub fn accumulate_events_with_metallicity<D, I>(
    edges: &[f64],
    mass_per_bin: &[f64],
    dtds: &[D],
    grid: &MetallicityGrid,
    metallicity: &I,
) -> Result<Vec<f64>>
where
    D: BinnedIntegral,
    I: Interpolant + ?Sized,
{
    check_binning(edges, mass_per_bin)?;
    check_dtd_rows(dtds, grid)?;
    let mut events = vec![0.0; mass_per_bin.len()];
    for b in 0..mass_per_bin.len() {
        let dtd = &dtds[formation_metallicity_index(edges, b, grid, metallicity)];
        accumulate_bin(&mut events, edges, b, mass_per_bin[b], dtd)?;
    }
    Ok(events)
}

/// Normalised form of [`accumulate_events_with_metallicity`]
#[instrument(skip_all, fields(n_bins = mass_per_bin.len(), n_metallicities = dtds.len()))]
pub fn calculate_event_rates_with_metallicity<D, I>(
    edges: &[f64],
    mass_per_bin: &[f64],
    dtds: &[D],
    grid: &MetallicityGrid,
    metallicity: &I,
) -> Result<Histogram>
where
    D: BinnedIntegral,
    I: Interpolant + ?Sized,
{
    let events = accumulate_events_with_metallicity(edges, mass_per_bin, dtds, grid, metallicity)?;
    normalize_event_rates(edges, events)
}

/// Divide accumulated events by the bin widths and scale by 1e9
pub fn normalize_event_rates(edges: &[f64], events: Vec<f64>) -> Result<Histogram> {
    let mut rates = Histogram::new(edges.to_vec(), events)?;
    let widths = rates.bin_widths().to_vec();
    let values = rates
        .values()
        .iter()
        .zip(&widths)
        .map(|(v, w)| v / w * 1e9)
        .collect();
    rates.set_values(values)?;
    debug!("Event rate total over {} bins: {:.6e}", rates.len(), rates.values().iter().sum::<f64>());
    Ok(rates)
}

/// Rescale a rate per Mpc^3 to a rate per Gpc^3
///
/// Never applied implicitly by the calculations above.
pub fn to_per_gpc3(rates: &Histogram) -> Histogram {
    rates * 1e9
}

/// Index of the DTD row used for formation bin `b`
pub fn formation_metallicity_index<I: Interpolant + ?Sized>(
    edges: &[f64],
    b: usize,
    grid: &MetallicityGrid,
    metallicity: &I,
) -> usize {
    let z_lo = metallicity.evaluate(edges[b] * 1e9);
    let z_hi = metallicity.evaluate(edges[b + 1] * 1e9);
    grid.index_of((z_hi - z_lo).abs() / 2.0)
}

// Add the contributions of mass formed in bin `b`
fn accumulate_bin<D: BinnedIntegral + ?Sized>(
    events: &mut [f64],
    edges: &[f64],
    b: usize,
    mass: f64,
    dtd: &D,
) -> Result<()> {
    if mass == 0.0 {
        return Ok(());
    }
    let t = edges[b + 1];
    for j in 0..=b {
        let p1 = t - edges[j];
        let p2 = t - edges[j + 1];
        events[j] += dtd.integral(p2, p1)? * mass;
    }
    Ok(())
}

fn check_binning(edges: &[f64], mass_per_bin: &[f64]) -> Result<()> {
    if edges.len() != mass_per_bin.len() + 1 {
        return Err(Error::size_mismatch(mass_per_bin.len() + 1, edges.len()));
    }
    Error::check_increasing(edges, "output edges")?;
    if mass_per_bin.iter().any(|m| !m.is_finite()) {
        return Err(Error::non_finite("mass per bin"));
    }
    Ok(())
}

fn check_dtd_rows<D>(dtds: &[D], grid: &MetallicityGrid) -> Result<()> {
    if dtds.len() != grid.len() {
        return Err(Error::size_mismatch(grid.len(), dtds.len()));
    }
    Ok(())
}

#[cfg(feature = "parallel")]
mod parallel {
    use rayon::prelude::*;

    use super::*;
    use kea_core::utils::add_assign;

    // Outer loop over formation bins with one accumulator per worker,
    // merged by elementwise sum
    fn par_accumulate<F>(n_bins: usize, contribute: F) -> Result<Vec<f64>>
    where
        F: Fn(&mut [f64], usize) -> Result<()> + Sync,
    {
        (0..n_bins)
            .into_par_iter()
            .try_fold(
                || vec![0.0; n_bins],
                |mut acc, b| {
                    contribute(acc.as_mut_slice(), b)?;
                    Ok::<_, Error>(acc)
                },
            )
            .try_reduce(
                || vec![0.0; n_bins],
                |mut left, right| {
                    add_assign(&mut left, &right);
                    Ok(left)
                },
            )
    }

    /// Parallel [`accumulate_events`](super::accumulate_events)
    pub fn par_accumulate_events<D: BinnedIntegral + Sync + ?Sized>(
        edges: &[f64],
        mass_per_bin: &[f64],
        dtd: &D,
    ) -> Result<Vec<f64>> {
        check_binning(edges, mass_per_bin)?;
        par_accumulate(mass_per_bin.len(), |acc, b| {
            accumulate_bin(acc, edges, b, mass_per_bin[b], dtd)
        })
    }

    /// Parallel [`calculate_event_rates`](super::calculate_event_rates)
    pub fn par_calculate_event_rates<D: BinnedIntegral + Sync + ?Sized>(
        edges: &[f64],
        mass_per_bin: &[f64],
        dtd: &D,
    ) -> Result<Histogram> {
        let events = par_accumulate_events(edges, mass_per_bin, dtd)?;
        normalize_event_rates(edges, events)
    }

    /// Parallel [`accumulate_events_with_metallicity`](super::accumulate_events_with_metallicity)
    pub fn par_accumulate_events_with_metallicity<D, I>(
        edges: &[f64],
        mass_per_bin: &[f64],
        dtds: &[D],
        grid: &MetallicityGrid,
        metallicity: &I,
    ) -> Result<Vec<f64>>
    where
        D: BinnedIntegral + Sync,
        I: Interpolant + Sync + ?Sized,
    {
        check_binning(edges, mass_per_bin)?;
        check_dtd_rows(dtds, grid)?;
        par_accumulate(mass_per_bin.len(), |acc, b| {
            let dtd = &dtds[formation_metallicity_index(edges, b, grid, metallicity)];
            accumulate_bin(acc, edges, b, mass_per_bin[b], dtd)
        })
    }

    /// Parallel [`calculate_event_rates_with_metallicity`](super::calculate_event_rates_with_metallicity)
    pub fn par_calculate_event_rates_with_metallicity<D, I>(
        edges: &[f64],
        mass_per_bin: &[f64],
        dtds: &[D],
        grid: &MetallicityGrid,
        metallicity: &I,
    ) -> Result<Histogram>
    where
        D: BinnedIntegral + Sync,
        I: Interpolant + Sync + ?Sized,
    {
        let events =
            par_accumulate_events_with_metallicity(edges, mass_per_bin, dtds, grid, metallicity)?;
        normalize_event_rates(edges, events)
    }
}

#[cfg(feature = "parallel")]
pub use parallel::{
    par_accumulate_events, par_accumulate_events_with_metallicity, par_calculate_event_rates,
    par_calculate_event_rates_with_metallicity,
};
