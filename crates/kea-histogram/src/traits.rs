//! Core traits for binned integration

use kea_core::Result;

use crate::population::PopulationHistogram;
use crate::types::Histogram;

/// A binned quantity that can be integrated exactly over sub-ranges
///
/// The convolution engine is generic over this trait so that plain
/// histograms and population-age histograms (with their unit factor)
/// go through the same triangular sum.
pub trait BinnedIntegral {
    /// Integral between `x1` and `x2` inside [`range`](Self::range); reversed bounds negate it
    fn integral(&self, x1: f64, x2: f64) -> Result<f64>;

    /// Lowest and highest edge
    fn range(&self) -> (f64, f64);
}

impl BinnedIntegral for Histogram {
    fn integral(&self, x1: f64, x2: f64) -> Result<f64> {
        Histogram::integral(self, x1, x2)
    }

    fn range(&self) -> (f64, f64) {
        (self.low(), self.high())
    }
}

impl BinnedIntegral for PopulationHistogram {
    fn integral(&self, x1: f64, x2: f64) -> Result<f64> {
        PopulationHistogram::integral(self, x1, x2)
    }

    fn range(&self) -> (f64, f64) {
        let h = self.as_histogram();
        (h.low(), h.high())
    }
}

impl<B: BinnedIntegral + ?Sized> BinnedIntegral for &B {
    fn integral(&self, x1: f64, x2: f64) -> Result<f64> {
        (**self).integral(x1, x2)
    }

    fn range(&self) -> (f64, f64) {
        (**self).range()
    }
}
