//! Interpolation capability consumed by the rate calculations
//!
//! The star-formation and metallicity histories enter the engine as
//! continuous functions of lookback time. The engine only ever evaluates
//! them or integrates them over sub-intervals, so it depends on the
//! [`Interpolant`] trait rather than on a particular spline. A degree-1
//! interpolating spline ([`LinearSpline`]) is provided as the default.

use crate::{Error, Result};

/// A continuous function that can be evaluated and integrated
pub trait Interpolant {
    /// Evaluate the function at `x`
    fn evaluate(&self, x: f64) -> f64;

    /// Definite integral over `[x1, x2]`
    ///
    /// Reversed bounds give the negated integral.
    fn definite_integral(&self, x1: f64, x2: f64) -> f64;
}

/// Interpolants that can be fitted to tabulated points
pub trait FitInterpolant: Interpolant + Sized {
    /// Fit through `(x, y)`; `x` must be strictly increasing
    fn fit(x: &[f64], y: &[f64]) -> Result<Self>;
}

impl<I: Interpolant + ?Sized> Interpolant for &I {
    fn evaluate(&self, x: f64) -> f64 {
        (**self).evaluate(x)
    }

    fn definite_integral(&self, x1: f64, x2: f64) -> f64 {
        (**self).definite_integral(x1, x2)
    }
}

/// Degree-1 interpolating spline
///
/// Evaluation extrapolates linearly from the end segments. Integration only
/// covers the part of the interval that lies inside the knot range, the same
/// as a B-spline whose basis vanishes outside its knots.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSpline {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl LinearSpline {
    /// Knot abscissae
    pub fn knots(&self) -> &[f64] {
        &self.x
    }

    /// Values at the knots
    pub fn values(&self) -> &[f64] {
        &self.y
    }

    /// Lowest and highest knot
    pub fn domain(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    // Index of the segment used for `x`, clamped to the end segments
    fn segment(&self, x: f64) -> usize {
        let last = self.x.len() - 2;
        self.x.partition_point(|&k| k <= x).saturating_sub(1).min(last)
    }

    fn interpolate_in(&self, i: usize, x: f64) -> f64 {
        let (x0, x1) = (self.x[i], self.x[i + 1]);
        let (y0, y1) = (self.y[i], self.y[i + 1]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }

    // Integral over [lo, hi] with both inside the knot range and lo <= hi
    fn integrate_inside(&self, lo: f64, hi: f64) -> f64 {
        let first = self.segment(lo);
        let last = self.segment(hi);
        let mut total = 0.0;
        for i in first..=last {
            let a = lo.max(self.x[i]);
            let b = hi.min(self.x[i + 1]);
            if b > a {
                // Trapezoid is exact on a linear piece
                total += 0.5 * (b - a) * (self.interpolate_in(i, a) + self.interpolate_in(i, b));
            }
        }
        total
    }
}

impl Interpolant for LinearSpline {
    fn evaluate(&self, x: f64) -> f64 {
        self.interpolate_in(self.segment(x), x)
    }

    fn definite_integral(&self, x1: f64, x2: f64) -> f64 {
        if x1 > x2 {
            return -self.definite_integral(x2, x1);
        }
        let (low, high) = self.domain();
        let lo = x1.max(low);
        let hi = x2.min(high);
        if hi <= lo {
            return 0.0;
        }
        self.integrate_inside(lo, hi)
    }
}

impl FitInterpolant for LinearSpline {
    fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::size_mismatch(x.len(), y.len()));
        }
        if x.len() < 2 {
            return Err(Error::InvalidInput(format!(
                "a linear spline needs at least 2 points, got {}",
                x.len()
            )));
        }
        if x.iter().chain(y).any(|v| !v.is_finite()) {
            return Err(Error::non_finite("spline data"));
        }
        Error::check_increasing(x, "spline abscissae")?;

        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
        })
    }
}
