//! Utility functions for working with edge and value slices

/// Evenly spaced values over `[start, stop]`, both ends included
///
/// # Examples
///
/// ```rust
/// use kea_core::utils::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut out: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            // Pin the endpoint so repeated step sums cannot drift past it
            out[num - 1] = stop;
            out
        }
    }
}

/// Differences between consecutive elements
///
/// Returns an empty vector for slices with less than 2 elements.
///
/// # Examples
///
/// ```rust
/// use kea_core::utils::diff;
///
/// assert_eq!(diff(&[0.0, 1.0, 3.0]), vec![1.0, 2.0]);
/// ```
pub fn diff(data: &[f64]) -> Vec<f64> {
    data.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Elementwise sum of two equally sized slices into the first
pub fn add_assign(acc: &mut [f64], other: &[f64]) {
    for (a, b) in acc.iter_mut().zip(other) {
        *a += b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);

        let x = linspace(0.0, 13.799, 101);
        assert_eq!(x.len(), 101);
        assert_eq!(x[0], 0.0);
        assert_eq!(x[100], 13.799);
        assert!(x.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_diff() {
        assert!(diff(&[]).is_empty());
        assert!(diff(&[1.0]).is_empty());
        assert_eq!(diff(&[1.0, 4.0, 9.0]), vec![3.0, 5.0]);
    }

    #[test]
    fn test_add_assign() {
        let mut acc = vec![1.0, 2.0, 3.0];
        add_assign(&mut acc, &[1.0, 1.0, 1.0]);
        assert_eq!(acc, vec![2.0, 3.0, 4.0]);
    }
}
