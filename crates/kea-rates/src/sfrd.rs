//! Star-formation rate density from simulated galaxy catalogues
//!
//! Galaxies arrive as parallel columns already read from the simulation
//! output. Rates are summed per snapshot (and per metallicity bin) and
//! divided by the comoving volume of the simulation box.

use tracing::debug;

use kea_core::{Error, Result, SimulationVolume};

use crate::metallicity::MetallicityGrid;

/// Galaxy properties as parallel columns
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxySample {
    snapshot: Vec<usize>,
    stellar_mass: Vec<f64>,
    metal_mass: Vec<f64>,
    sfr: Vec<f64>,
}

impl GalaxySample {
    /// Columns must all have the same length
    pub fn new(
        snapshot: Vec<usize>,
        stellar_mass: Vec<f64>,
        metal_mass: Vec<f64>,
        sfr: Vec<f64>,
    ) -> Result<Self> {
        let n = snapshot.len();
        for len in [stellar_mass.len(), metal_mass.len(), sfr.len()] {
            if len != n {
                return Err(Error::size_mismatch(n, len));
            }
        }
        if stellar_mass.iter().chain(&metal_mass).chain(&sfr).any(|v| !v.is_finite()) {
            return Err(Error::non_finite("galaxy sample"));
        }
        Ok(Self {
            snapshot,
            stellar_mass,
            metal_mass,
            sfr,
        })
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    // Rows with a validated snapshot index
    fn rows(&self, n_snapshots: usize) -> Result<impl Iterator<Item = (usize, f64, f64, f64)> + '_> {
        if let Some(&bad) = self.snapshot.iter().find(|&&s| s >= n_snapshots) {
            return Err(Error::out_of_range(bad as f64, 0.0, n_snapshots as f64 - 1.0));
        }
        Ok(self
            .snapshot
            .iter()
            .zip(&self.stellar_mass)
            .zip(&self.metal_mass)
            .zip(&self.sfr)
            .map(|(((&s, &m), &z), &r)| (s, m, z, r)))
    }
}

/// SFR density per (metallicity bin, snapshot)
#[derive(Debug, Clone, PartialEq)]
pub struct SfrdGrid {
    grid: MetallicityGrid,
    n_snapshots: usize,
    // Row-major: metallicity index, then snapshot
    values: Vec<f64>,
}

impl SfrdGrid {
    pub fn grid(&self) -> &MetallicityGrid {
        &self.grid
    }

    pub fn n_snapshots(&self) -> usize {
        self.n_snapshots
    }

    /// SFR density history of one metallicity bin, indexed by snapshot
    pub fn column(&self, z_idx: usize) -> Result<&[f64]> {
        if z_idx >= self.grid.len() {
            return Err(Error::out_of_range(z_idx as f64, 0.0, (self.grid.len() - 1) as f64));
        }
        Ok(self.row(z_idx))
    }

    pub fn get(&self, z_idx: usize, snapshot: usize) -> Result<f64> {
        if snapshot >= self.n_snapshots {
            return Err(Error::out_of_range(
                snapshot as f64,
                0.0,
                self.n_snapshots.saturating_sub(1) as f64,
            ));
        }
        Ok(self.column(z_idx)?[snapshot])
    }

    /// Sum over metallicity bins per snapshot
    pub fn total(&self) -> Vec<f64> {
        let mut total = vec![0.0; self.n_snapshots];
        for z_idx in 0..self.grid.len() {
            kea_core::utils::add_assign(&mut total, self.row(z_idx));
        }
        total
    }

    fn row(&self, z_idx: usize) -> &[f64] {
        &self.values[z_idx * self.n_snapshots..(z_idx + 1) * self.n_snapshots]
    }
}

/// Total SFR density per snapshot, ignoring metallicity
///
/// # Examples
///
/// ```rust
/// use kea_core::SimulationVolume;
/// use kea_rates::{total_sfrd, GalaxySample};
///
/// let sample = GalaxySample::new(vec![0, 1, 1], vec![1.0; 3], vec![0.02; 3], vec![2.0, 1.0, 3.0]).unwrap();
/// let volume = SimulationVolume { box_length: 10.0, hubble_param: 1.0 };
/// let sfrd = total_sfrd(&sample, 3, &volume).unwrap();
/// assert_eq!(sfrd, vec![0.002, 0.004, 0.0]);
/// ```
pub fn total_sfrd(sample: &GalaxySample, n_snapshots: usize, volume: &SimulationVolume) -> Result<Vec<f64>> {
    let mut sfr = vec![0.0; n_snapshots];
    for (snap, _, _, rate) in sample.rows(n_snapshots)? {
        sfr[snap] += rate;
    }
    let v = volume.mpc3();
    Ok(sfr.into_iter().map(|s| s / v).collect())
}

/// SFR density split by metallicity bin
///
/// Each galaxy's metallicity (metal mass over stellar mass) is assigned to a
/// bin of `grid`. Galaxies with zero stellar mass have no metallicity and
/// are skipped.
pub fn sfrd_by_metallicity(
    sample: &GalaxySample,
    n_snapshots: usize,
    grid: &MetallicityGrid,
    volume: &SimulationVolume,
) -> Result<SfrdGrid> {
    let mut values = vec![0.0; grid.len() * n_snapshots];
    let mut skipped = 0usize;
    for (snap, mass, metals, rate) in sample.rows(n_snapshots)? {
        if mass == 0.0 {
            skipped += 1;
            continue;
        }
        let z_idx = grid.index_of(metals / mass);
        values[z_idx * n_snapshots + snap] += rate;
    }
    if skipped > 0 {
        debug!("Skipped {} galaxies without stellar mass", skipped);
    }

    let v = volume.mpc3();
    values.iter_mut().for_each(|x| *x /= v);
    Ok(SfrdGrid {
        grid: grid.clone(),
        n_snapshots,
        values,
    })
}

/// Stellar-mass-weighted mean metallicity per snapshot
///
/// Snapshots without stellar mass get zero.
pub fn metallicity_history(sample: &GalaxySample, n_snapshots: usize) -> Result<Vec<f64>> {
    let mut mass = vec![0.0; n_snapshots];
    let mut metals = vec![0.0; n_snapshots];
    for (snap, m, z, _) in sample.rows(n_snapshots)? {
        mass[snap] += m;
        metals[snap] += z;
    }
    Ok(metals
        .iter()
        .zip(&mass)
        .map(|(&z, &m)| if m > 0.0 { z / m } else { 0.0 })
        .collect())
}
