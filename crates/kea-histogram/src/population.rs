//! Histograms on the fixed stellar-population age grid
//!
//! Population synthesis models tabulate their outputs in 51 age bins. The
//! first bin runs from zero up to 10^6.05 yr; the remaining 50 are spaced
//! by 0.1 dex up to 10^11.05 yr. Integration happens on linear edges in
//! Gyr, while model columns and plots are indexed by log10(age/yr), so the
//! log view is derived from the same constants on demand.

use std::fmt;
use std::ops::{AddAssign, Index, IndexMut};
use std::sync::{Arc, OnceLock};

use kea_core::utils::linspace;
use kea_core::{Error, Result};

use crate::types::Histogram;

/// Number of bins on the population age grid
pub const POPULATION_BINS: usize = 51;

/// log10(age/yr) of the first non-zero edge
pub const LOG_AGE_FIRST_EDGE: f64 = 6.05;

/// log10(age/yr) of the last edge
pub const LOG_AGE_LAST_EDGE: f64 = 11.05;

/// Lower log edge reported for the first bin, which really starts at age 0
pub const LOG_AGE_DISPLAY_FLOOR: f64 = 5.95;

/// Years per Gyr; population integrals are reported per year
pub const YEARS_PER_GYR: f64 = 1e9;

static LINEAR_EDGES: OnceLock<Arc<[f64]>> = OnceLock::new();

/// Linear bin edges in Gyr: `0` followed by `10^(6.05 + 0.1 k) / 1e9`
pub fn linear_edges() -> &'static Arc<[f64]> {
    LINEAR_EDGES.get_or_init(|| {
        std::iter::once(0.0)
            .chain(
                linspace(LOG_AGE_FIRST_EDGE, LOG_AGE_LAST_EDGE, POPULATION_BINS)
                    .into_iter()
                    .map(|log_age| 10f64.powf(log_age) / YEARS_PER_GYR),
            )
            .collect()
    })
}

/// Edges in log10(age/yr), with the first edge shown as 5.95
pub fn log_edges() -> Vec<f64> {
    linspace(LOG_AGE_DISPLAY_FLOOR, LOG_AGE_LAST_EDGE, POPULATION_BINS + 1)
}

/// Nominal bin ages in log10(age/yr): 6.0, 6.1, ..., 11.0
///
/// These match the age column of population model files.
pub fn log_bin_centers() -> Vec<f64> {
    linspace(6.0, 11.0, POPULATION_BINS)
}

/// Nominal bin ages in years
pub fn linear_bin_centers() -> Vec<f64> {
    log_bin_centers().into_iter().map(|x| 10f64.powf(x)).collect()
}

/// A histogram binned on the population age grid
///
/// Values are specific rates per year; ages are in Gyr, so
/// [`integral`](Self::integral) multiplies by 1e9 to return a count per
/// unit mass.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationHistogram {
    inner: Histogram,
}

impl PopulationHistogram {
    /// Create from the 51 per-bin values
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.len() != POPULATION_BINS {
            return Err(Error::size_mismatch(POPULATION_BINS, values.len()));
        }
        Ok(Self {
            inner: Histogram::from_trusted_edges(Arc::clone(linear_edges()), values),
        })
    }

    /// Population histogram with every value zero
    pub fn zeros() -> Self {
        Self {
            inner: Histogram::from_trusted_edges(
                Arc::clone(linear_edges()),
                vec![0.0; POPULATION_BINS],
            ),
        }
    }

    pub fn as_histogram(&self) -> &Histogram {
        &self.inner
    }

    pub fn into_histogram(self) -> Histogram {
        self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        self.inner.values()
    }

    /// Linear edges in Gyr
    pub fn edges(&self) -> &[f64] {
        self.inner.edges()
    }

    /// Edges in log10(age/yr)
    pub fn log_edges(&self) -> Vec<f64> {
        log_edges()
    }

    /// Bin widths in Gyr
    pub fn bin_widths(&self) -> &[f64] {
        self.inner.bin_widths()
    }

    pub fn get_bin(&self, age_gyr: f64) -> Result<usize> {
        self.inner.get_bin(age_gyr)
    }

    /// Integral between two ages in Gyr, in events per unit mass
    pub fn integral(&self, x1: f64, x2: f64) -> Result<f64> {
        Ok(self.inner.integral(x1, x2)? * YEARS_PER_GYR)
    }

    pub(crate) fn inner_mut(&mut self) -> &mut Histogram {
        &mut self.inner
    }
}

impl Index<usize> for PopulationHistogram {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.inner[i]
    }
}

impl IndexMut<usize> for PopulationHistogram {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.inner[i]
    }
}

impl AddAssign<&PopulationHistogram> for PopulationHistogram {
    /// Bin-by-bin sum; both sides share the fixed grid
    fn add_assign(&mut self, rhs: &PopulationHistogram) {
        for (a, b) in self.inner.values_mut().iter_mut().zip(rhs.values()) {
            *a += b;
        }
    }
}

impl fmt::Display for PopulationHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PopulationHistogram({} bins, log age=[{:.2}, {:.2}])",
            self.len(),
            LOG_AGE_DISPLAY_FLOOR,
            LOG_AGE_LAST_EDGE
        )
    }
}
