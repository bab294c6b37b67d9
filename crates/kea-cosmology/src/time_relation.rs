//! Snapshot to cosmic-time relation of a cosmological simulation

use std::collections::HashMap;

use kea_core::{Error, FitInterpolant, Result};

/// Lookback time and redshift of every simulation snapshot
///
/// Stored as parallel sequences; `snapshots[i]` was taken at
/// `lookback_gyr[i]` Gyr ago, at redshift `redshift[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeRelation {
    snapshots: Vec<usize>,
    lookback_gyr: Vec<f64>,
    redshift: Vec<f64>,
    position: HashMap<usize, usize>,
}

impl TimeRelation {
    /// Build from parallel columns
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kea_cosmology::TimeRelation;
    ///
    /// let relation = TimeRelation::new(vec![0, 1, 2], vec![12.0, 6.0, 0.0], vec![5.0, 0.6, 0.0]).unwrap();
    /// assert_eq!(relation.lookback_of(1).unwrap(), 6.0);
    /// assert!(relation.lookback_of(3).is_err());
    /// ```
    pub fn new(snapshots: Vec<usize>, lookback_gyr: Vec<f64>, redshift: Vec<f64>) -> Result<Self> {
        if lookback_gyr.len() != snapshots.len() {
            return Err(Error::size_mismatch(snapshots.len(), lookback_gyr.len()));
        }
        if redshift.len() != snapshots.len() {
            return Err(Error::size_mismatch(snapshots.len(), redshift.len()));
        }
        if lookback_gyr.iter().chain(&redshift).any(|v| !v.is_finite()) {
            return Err(Error::non_finite("time relation"));
        }

        let mut position = HashMap::with_capacity(snapshots.len());
        for (i, &snap) in snapshots.iter().enumerate() {
            if position.insert(snap, i).is_some() {
                return Err(Error::InvalidInput(format!("duplicate snapshot {snap}")));
            }
        }

        Ok(Self {
            snapshots,
            lookback_gyr,
            redshift,
            position,
        })
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[usize] {
        &self.snapshots
    }

    pub fn lookback_gyr(&self) -> &[f64] {
        &self.lookback_gyr
    }

    pub fn redshift(&self) -> &[f64] {
        &self.redshift
    }

    /// Lookback time (Gyr) of a snapshot number
    pub fn lookback_of(&self, snapshot: usize) -> Result<f64> {
        self.position
            .get(&snapshot)
            .map(|&i| self.lookback_gyr[i])
            .ok_or_else(|| Error::InvalidInput(format!("unknown snapshot {snapshot}")))
    }

    /// Redshift of a snapshot number
    pub fn redshift_of(&self, snapshot: usize) -> Result<f64> {
        self.position
            .get(&snapshot)
            .map(|&i| self.redshift[i])
            .ok_or_else(|| Error::InvalidInput(format!("unknown snapshot {snapshot}")))
    }

    /// Fit an interpolant over lookback time in years
    ///
    /// `per_snapshot[s]` is the value at snapshot number `s`. Knots are
    /// sorted by ascending lookback time before fitting.
    pub fn interpolant<I: FitInterpolant>(&self, per_snapshot: &[f64]) -> Result<I> {
        let mut points = self
            .snapshots
            .iter()
            .zip(&self.lookback_gyr)
            .map(|(&snap, &t)| {
                per_snapshot
                    .get(snap)
                    .map(|&v| (t * 1e9, v))
                    .ok_or_else(|| Error::out_of_range(snap as f64, 0.0, per_snapshot.len() as f64))
            })
            .collect::<Result<Vec<_>>>()?;
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (x, y): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
        I::fit(&x, &y)
    }
}
