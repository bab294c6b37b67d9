//! Operations on histograms
//!
//! Scalar arithmetic touches only the values; edges are shared untouched.
//! Both the non-mutating (`h * k`, `&h / k`) and in-place (`h *= k`) forms
//! are provided.

use std::ops::{Div, DivAssign, Index, IndexMut, Mul, MulAssign};

use crate::population::PopulationHistogram;
use crate::types::Histogram;

impl Index<usize> for Histogram {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.values()[i]
    }
}

impl IndexMut<usize> for Histogram {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.values_mut()[i]
    }
}

impl MulAssign<f64> for Histogram {
    fn mul_assign(&mut self, k: f64) {
        self.values_mut().iter_mut().for_each(|v| *v *= k);
    }
}

impl DivAssign<f64> for Histogram {
    fn div_assign(&mut self, k: f64) {
        self.values_mut().iter_mut().for_each(|v| *v /= k);
    }
}

impl MulAssign<f64> for PopulationHistogram {
    fn mul_assign(&mut self, k: f64) {
        *self.inner_mut() *= k;
    }
}

impl DivAssign<f64> for PopulationHistogram {
    fn div_assign(&mut self, k: f64) {
        *self.inner_mut() /= k;
    }
}

// Owned and borrowed binary forms, both built on the in-place ones
macro_rules! scalar_binary_ops {
    ($ty:ty) => {
        impl Mul<f64> for $ty {
            type Output = $ty;

            fn mul(mut self, k: f64) -> $ty {
                self *= k;
                self
            }
        }

        impl Mul<f64> for &$ty {
            type Output = $ty;

            fn mul(self, k: f64) -> $ty {
                self.clone() * k
            }
        }

        impl Div<f64> for $ty {
            type Output = $ty;

            fn div(mut self, k: f64) -> $ty {
                self /= k;
                self
            }
        }

        impl Div<f64> for &$ty {
            type Output = $ty;

            fn div(self, k: f64) -> $ty {
                self.clone() / k
            }
        }
    };
}

scalar_binary_ops!(Histogram);
scalar_binary_ops!(PopulationHistogram);
