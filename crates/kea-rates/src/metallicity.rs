//! Discrete metallicity grid of the population-synthesis models

use serde::{Deserialize, Serialize};

use kea_core::{Error, Result};

/// Metallicities with published population models
pub const BPASS_METALLICITIES: [f64; 13] = [
    0.00001, 0.0001, 0.001, 0.002, 0.003, 0.004, 0.006, 0.008, 0.010, 0.014, 0.020, 0.030, 0.040,
];

/// Boundaries between neighbouring [`BPASS_METALLICITIES`]
pub const BPASS_METALLICITY_EDGES: [f64; 12] = [
    0.00005, 0.0005, 0.0015, 0.0025, 0.0035, 0.005, 0.007, 0.009, 0.012, 0.017, 0.025, 0.035,
];

/// File-name labels of [`BPASS_METALLICITIES`]
pub const BPASS_METALLICITY_LABELS: [&str; 13] = [
    "em5", "em4", "001", "002", "003", "004", "006", "008", "010", "014", "020", "030", "040",
];

/// Ordered representative metallicities separated by ordered edges
///
/// A metallicity maps to the representative of the first edge that is
/// greater than or equal to it. Values above every edge map to the last
/// representative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetallicityGrid {
    representatives: Vec<f64>,
    edges: Vec<f64>,
}

impl MetallicityGrid {
    /// Build a grid; `edges` must have one element fewer than `representatives`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kea_rates::MetallicityGrid;
    ///
    /// let grid = MetallicityGrid::new(vec![0.0001, 0.004, 0.02], vec![0.001, 0.01]).unwrap();
    /// assert_eq!(grid.index_of(0.0), 0);
    /// assert_eq!(grid.index_of(0.005), 1);
    /// assert_eq!(grid.index_of(0.5), 2);
    /// ```
    pub fn new(representatives: Vec<f64>, edges: Vec<f64>) -> Result<Self> {
        if representatives.is_empty() {
            return Err(Error::InvalidInput(
                "metallicity grid needs at least one representative".to_string(),
            ));
        }
        if edges.len() + 1 != representatives.len() {
            return Err(Error::size_mismatch(representatives.len() - 1, edges.len()));
        }
        Error::check_increasing(&representatives, "metallicity representatives")?;
        Error::check_increasing(&edges, "metallicity edges")?;
        Ok(Self {
            representatives,
            edges,
        })
    }

    /// The 13-point grid of the population-synthesis models
    pub fn bpass() -> Self {
        Self {
            representatives: BPASS_METALLICITIES.to_vec(),
            edges: BPASS_METALLICITY_EDGES.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.representatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.representatives.is_empty()
    }

    pub fn representatives(&self) -> &[f64] {
        &self.representatives
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Index of the representative a metallicity is assigned to
    pub fn index_of(&self, metallicity: f64) -> usize {
        self.edges.partition_point(|&e| e < metallicity)
    }

    /// Representative metallicity a value is assigned to
    pub fn representative(&self, metallicity: f64) -> f64 {
        self.representatives[self.index_of(metallicity)]
    }
}

impl Default for MetallicityGrid {
    fn default() -> Self {
        Self::bpass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_edge_at_or_above() {
        let grid = MetallicityGrid::bpass();
        assert_eq!(grid.index_of(0.0), 0);
        assert_eq!(grid.index_of(0.00005), 0);
        assert_eq!(grid.index_of(0.00006), 1);
        assert_eq!(grid.index_of(0.02), 10);
        assert_eq!(grid.representative(0.019), 0.020);
        assert_eq!(grid.index_of(0.035), 11);
        assert_eq!(grid.index_of(1.0), 12);
    }

    #[test]
    fn test_construction_checks() {
        assert!(MetallicityGrid::new(vec![], vec![]).is_err());
        assert!(MetallicityGrid::new(vec![0.1, 0.2], vec![]).is_err());
        assert!(MetallicityGrid::new(vec![0.1, 0.2, 0.3], vec![0.25, 0.15]).is_err());
        let single = MetallicityGrid::new(vec![0.02], vec![]).unwrap();
        assert_eq!(single.index_of(0.3), 0);
    }

    #[test]
    fn test_bpass_tables_consistent() {
        let grid = MetallicityGrid::bpass();
        assert_eq!(grid.len(), BPASS_METALLICITY_LABELS.len());
        for (i, &z) in grid.representatives().iter().enumerate() {
            assert_eq!(grid.index_of(z), i);
        }
    }
}
