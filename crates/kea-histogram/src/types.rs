//! Core types for histogram representation

use std::fmt;
use std::sync::Arc;

use kea_core::utils::{diff, linspace};
use kea_core::{Error, Result};

/// A binned container with fixed edges and mutable values
///
/// Bins are half-open `[edges[i], edges[i+1])`, except the last bin which
/// also contains the final edge. Cloning gives an independent copy of the
/// values; the edge array is shared since it never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Bin edges, strictly increasing, one more than the number of bins
    edges: Arc<[f64]>,
    /// Cached `edges[i+1] - edges[i]`
    widths: Arc<[f64]>,
    /// One value per bin
    values: Vec<f64>,
}

impl Histogram {
    /// Create a histogram from edges and per-bin values
    ///
    /// Fails when `values.len() != edges.len() - 1`, when there are no bins,
    /// or when the edges are not strictly increasing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kea_histogram::Histogram;
    ///
    /// let h = Histogram::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0]).unwrap();
    /// assert_eq!(h.integral(0.5, 1.5).unwrap(), 1.5);
    /// ```
    pub fn new(edges: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        Self::with_shared_edges(edges.into(), values)
    }

    /// Create a histogram reusing an existing edge array
    pub fn with_shared_edges(edges: Arc<[f64]>, values: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(Error::InvalidInput(format!(
                "a histogram needs at least 2 edges, got {}",
                edges.len()
            )));
        }
        if values.len() + 1 != edges.len() {
            return Err(Error::size_mismatch(edges.len() - 1, values.len()));
        }
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(Error::non_finite("histogram edges"));
        }
        Error::check_increasing(&edges, "histogram edges")?;

        Ok(Self::from_trusted_edges(edges, values))
    }

    // Edges already known to be valid and one longer than `values`
    pub(crate) fn from_trusted_edges(edges: Arc<[f64]>, values: Vec<f64>) -> Self {
        debug_assert_eq!(edges.len(), values.len() + 1);
        let widths = diff(&edges).into();
        Self {
            edges,
            widths,
            values,
        }
    }

    /// Histogram over `[low, high]` with `nr_bins` equal-width bins of zeros
    pub fn uniform(low: f64, high: f64, nr_bins: usize) -> Result<Self> {
        if nr_bins == 0 {
            return Err(Error::InvalidParameter("nr_bins must be positive".to_string()));
        }
        Self::new(linspace(low, high, nr_bins + 1), vec![0.0; nr_bins])
    }

    /// Histogram of zeros over the given edges
    pub fn zeros(edges: Vec<f64>) -> Result<Self> {
        let n = edges.len().saturating_sub(1);
        Self::new(edges, vec![0.0; n])
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; a histogram has at least one bin
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Replace all values at once
    pub fn set_values(&mut self, values: Vec<f64>) -> Result<()> {
        if values.len() != self.values.len() {
            return Err(Error::size_mismatch(self.values.len(), values.len()));
        }
        self.values = values;
        Ok(())
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// The shared edge array
    pub fn shared_edges(&self) -> &Arc<[f64]> {
        &self.edges
    }

    pub fn bin_widths(&self) -> &[f64] {
        &self.widths
    }

    /// Lowest edge
    pub fn low(&self) -> f64 {
        self.edges[0]
    }

    /// Highest edge
    pub fn high(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Centre of bin `i`
    pub fn bin_center(&self, i: usize) -> f64 {
        (self.edges[i] + self.edges[i + 1]) / 2.0
    }

    /// Bin centres as a vector
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    /// Index of the bin containing `x`
    ///
    /// The final edge belongs to the last bin; anything outside
    /// `[edges[0], edges[N]]` is an error.
    pub fn get_bin(&self, x: f64) -> Result<usize> {
        bin_index(x, &self.edges)
    }

    /// Exact integral of the step function between `x1` and `x2`
    ///
    /// Both bounds must lie within the edges. Reversed bounds give the
    /// negated integral.
    pub fn integral(&self, x1: f64, x2: f64) -> Result<f64> {
        if x1 > x2 {
            return Ok(-self.integral(x2, x1)?);
        }
        let lower = self.get_bin(x1)?;
        let upper = self.get_bin(x2)?;

        if lower == upper {
            return Ok(self.values[lower] * (x2 - x1));
        }

        let mut total = self.values[lower] * (self.edges[lower + 1] - x1);
        total += self.values[upper] * (x2 - self.edges[upper]);
        total += self.values[lower + 1..upper]
            .iter()
            .zip(&self.widths[lower + 1..upper])
            .map(|(v, w)| v * w)
            .sum::<f64>();
        Ok(total)
    }

    /// Sum of `value * width` over all bins
    pub fn total(&self) -> f64 {
        self.values.iter().zip(self.widths.iter()).map(|(v, w)| v * w).sum()
    }
}

/// Bin lookup shared by all binned containers
pub(crate) fn bin_index(x: f64, edges: &[f64]) -> Result<usize> {
    let low = edges[0];
    let high = edges[edges.len() - 1];
    if !(x >= low && x <= high) {
        return Err(Error::out_of_range(x, low, high));
    }
    if x == high {
        return Ok(edges.len() - 2);
    }
    // Number of edges <= x is at least one here
    Ok(edges.partition_point(|&e| e <= x) - 1)
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Histogram({} bins, range=[{:.3}, {:.3}])",
            self.len(),
            self.low(),
            self.high()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_hist(n: usize) -> Histogram {
        Histogram::new(linspace(0.0, n as f64, n + 1), vec![1.0; n]).unwrap()
    }

    #[test]
    fn test_histogram_creation() {
        let h = unit_hist(100);
        assert_eq!(h.len(), 100);
        assert_eq!(h.values(), &[1.0; 100][..]);
        assert_eq!(h.edges()[100], 100.0);
        assert!(h.bin_widths().iter().all(|&w| (w - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_shape_errors() {
        assert!(matches!(
            Histogram::new(vec![0.0, 1.0, 2.0], vec![1.0]),
            Err(Error::ShapeMismatch { expected: 2, actual: 1 })
        ));
        assert!(matches!(
            Histogram::new(vec![0.0], vec![]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            Histogram::new(vec![0.0, 2.0, 1.0], vec![1.0, 1.0]),
            Err(Error::NonMonotonic(_))
        ));
        assert!(Histogram::uniform(0.0, 1.0, 0).is_err());
    }

    #[test]
    fn test_get_bin() {
        let h = Histogram::zeros(linspace(0.0, 100.0, 1001)).unwrap();
        assert_eq!(h.get_bin(0.0).unwrap(), 0);
        assert_eq!(h.get_bin(1.121e-3).unwrap(), 0);
        assert_eq!(h.get_bin(0.15).unwrap(), 1);
        // Last edge belongs to the last bin
        assert_eq!(h.get_bin(100.0).unwrap(), 999);
        for (i, &e) in h.edges()[..1000].iter().enumerate() {
            assert_eq!(h.get_bin(e).unwrap(), i);
        }
    }

    #[test]
    fn test_get_bin_out_of_range() {
        let h = unit_hist(10);
        assert!(matches!(h.get_bin(-1.0), Err(Error::OutOfRange { .. })));
        assert!(matches!(h.get_bin(10.0 + 1e-12), Err(Error::OutOfRange { .. })));
        assert!(h.get_bin(f64::NAN).is_err());
    }

    #[test]
    fn test_integral() {
        let h = unit_hist(100);
        assert_eq!(h.integral(0.0, 1.0).unwrap(), 1.0);
        assert_eq!(h.integral(0.0, 0.5).unwrap(), 0.5);
        assert_eq!(h.integral(0.0, 1.5).unwrap(), 1.5);
        assert_eq!(h.integral(0.0, 10.0).unwrap(), 10.0);
        assert_eq!(h.integral(0.0, 100.0).unwrap(), 100.0);
        assert_eq!(h.integral(42.0, 42.0).unwrap(), 0.0);

        let h = Histogram::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0]).unwrap();
        assert_eq!(h.integral(0.5, 1.5).unwrap(), 1.5);
        assert_eq!(h.integral(0.0, 2.0).unwrap(), h.total());
    }

    #[test]
    fn test_integral_uneven_bins() {
        let h = Histogram::new(vec![0.0, 0.1, 1.0, 10.0], vec![3.0, 2.0, 1.0]).unwrap();
        // partial lower bin, one whole bin, partial upper bin
        let expected = 3.0 * 0.05 + 2.0 * 0.9 + 1.0 * 4.0;
        assert!((h.integral(0.05, 5.0).unwrap() - expected).abs() < 1e-12);
        assert!(matches!(h.integral(0.0, 11.0), Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn test_integral_reversed_bounds() {
        let h = Histogram::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]).unwrap();
        // 0.5 * 1 + 2 + 0.5 * 3
        assert_eq!(h.integral(0.5, 2.5).unwrap(), 4.0);
        assert_eq!(h.integral(2.5, 0.5).unwrap(), -4.0);
        assert_eq!(h.integral(1.75, 1.25).unwrap(), -1.0);
        assert!(matches!(h.integral(2.5, -1.0), Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn test_bin_center() {
        let h = unit_hist(100);
        assert_eq!(h.bin_center(0), 0.5);
        for (i, c) in h.centers().into_iter().enumerate() {
            assert_eq!(c, i as f64 + 0.5);
        }
    }

    #[test]
    fn test_copy_is_independent() {
        let mut h = unit_hist(100);
        let h2 = h.clone();
        assert_eq!(h.values(), h2.values());
        assert!(Arc::ptr_eq(h.shared_edges(), h2.shared_edges()));

        h.values_mut()[10] = 10.0;
        assert_ne!(h.values(), h2.values());
        assert_eq!(h2.values()[10], 1.0);
    }

    #[test]
    fn test_set_values() {
        let mut h = unit_hist(3);
        h.set_values(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(h.values(), &[1.0, 2.0, 3.0]);
        assert!(h.set_values(vec![1.0]).is_err());
    }

    #[test]
    fn test_display() {
        let h = unit_hist(3);
        assert_eq!(h.to_string(), "Histogram(3 bins, range=[0.000, 3.000])");
    }
}
