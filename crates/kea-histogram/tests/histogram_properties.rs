//! Property-based tests for histogram lookup, integration and scaling

use approx::assert_relative_eq;
use kea_histogram::{BinnedIntegral, Histogram, PopulationHistogram};
use proptest::prelude::*;

/// Strictly increasing edges built from a start point and positive widths
fn edges_and_values() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (-100.0..100.0f64, prop::collection::vec(0.01..10.0f64, 1..40)).prop_flat_map(
        |(start, widths)| {
            let mut edges = Vec::with_capacity(widths.len() + 1);
            edges.push(start);
            for w in &widths {
                let last = *edges.last().unwrap();
                edges.push(last + w);
            }
            let n = widths.len();
            (Just(edges), prop::collection::vec(-50.0..50.0f64, n))
        },
    )
}

proptest! {
    // Property: integrating over the whole range equals the weighted sum
    #[test]
    fn prop_full_integral_is_weighted_sum((edges, values) in edges_and_values()) {
        let h = Histogram::new(edges.clone(), values.clone()).unwrap();
        let expected: f64 = values
            .iter()
            .zip(edges.windows(2))
            .map(|(v, w)| v * (w[1] - w[0]))
            .sum();
        let full = h.integral(edges[0], *edges.last().unwrap()).unwrap();
        prop_assert!((full - expected).abs() <= 1e-9 * (1.0 + expected.abs()));
    }

    // Property: get_bin picks the unique half-open bin
    #[test]
    fn prop_get_bin_half_open((edges, values) in edges_and_values(), frac in 0.0..1.0f64) {
        let h = Histogram::new(edges.clone(), values).unwrap();
        let low = edges[0];
        let high = *edges.last().unwrap();
        let x = low + frac * (high - low);
        prop_assume!(x < high);

        let i = h.get_bin(x).unwrap();
        prop_assert!(edges[i] <= x && x < edges[i + 1]);
        prop_assert_eq!(h.get_bin(high).unwrap(), h.len() - 1);
        for (j, &e) in edges[..edges.len() - 1].iter().enumerate() {
            prop_assert_eq!(h.get_bin(e).unwrap(), j);
        }
    }

    // Property: integrals are additive across a split point
    #[test]
    fn prop_integral_additive((edges, values) in edges_and_values(), a in 0.0..1.0f64, b in 0.0..1.0f64, c in 0.0..1.0f64) {
        let h = Histogram::new(edges.clone(), values).unwrap();
        let low = edges[0];
        let high = *edges.last().unwrap();
        let span = high - low;
        let at = |f: f64| (low + f * span).min(high);
        let mut pts = [at(a), at(b), at(c)];
        pts.sort_by(|x, y| x.partial_cmp(y).unwrap());

        let whole = h.integral(pts[0], pts[2]).unwrap();
        let parts = h.integral(pts[0], pts[1]).unwrap() + h.integral(pts[1], pts[2]).unwrap();
        prop_assert!((whole - parts).abs() <= 1e-8 * (1.0 + whole.abs()));
    }

    // Property: scaling multiplies every value and round-trips through division
    #[test]
    fn prop_scaling_laws((edges, values) in edges_and_values(), k in prop_oneof![-1e3..-1e-3f64, 1e-3..1e3f64]) {
        let h = Histogram::new(edges, values).unwrap();
        let scaled = &h * k;
        for (s, v) in scaled.values().iter().zip(h.values()) {
            prop_assert_eq!(*s, v * k);
        }
        let back = (&h / k) * k;
        for (b, v) in back.values().iter().zip(h.values()) {
            prop_assert!((b - v).abs() <= 1e-12 * (1.0 + v.abs()));
        }
    }

    // Property: mutating a copy never touches the original
    #[test]
    fn prop_copy_independent((edges, values) in edges_and_values(), idx in 0usize..40, val in -1e6..1e6f64) {
        let h = Histogram::new(edges, values.clone()).unwrap();
        let mut copy = h.clone();
        let i = idx % copy.len();
        copy[i] = val;
        copy *= 3.0;
        prop_assert_eq!(h.values(), &values[..]);
    }
}

#[test]
fn test_out_of_range_is_never_clamped() {
    let h = Histogram::new(vec![1.0, 2.0, 4.0], vec![1.0, 1.0]).unwrap();
    assert!(h.integral(0.5, 2.0).is_err());
    assert!(h.integral(2.0, 4.5).is_err());
    assert!(h.get_bin(0.999_999).is_err());
    assert_eq!(h.get_bin(1.0).unwrap(), 0);
    assert_eq!(h.get_bin(4.0).unwrap(), 1);
}

#[test]
fn test_binned_integral_trait_dispatch() {
    let plain = Histogram::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0]).unwrap();
    let population = PopulationHistogram::new(vec![1.0; 51]).unwrap();

    let integrators: Vec<&dyn BinnedIntegral> = vec![&plain, &population];
    assert_relative_eq!(integrators[0].integral(0.5, 1.5).unwrap(), 1.5);
    assert_relative_eq!(integrators[1].integral(0.0, 1.0).unwrap(), 1e9, max_relative = 1e-12);

    let (low, high) = integrators[1].range();
    assert_eq!(low, 0.0);
    assert!(high > 100.0);
}
