//! Population-model variants and their count normalisation
//!
//! The model files report event counts per age bin for a population of
//! fixed initial mass. Each release scales those counts differently, so a
//! variant carries the factor needed to turn them into a specific rate in
//! events per year per solar mass.

use serde::{Deserialize, Serialize};

use kea_core::{Error, Result};
use kea_histogram::{PopulationHistogram, POPULATION_BINS};

use crate::event::EventType;

/// Model release a raw DTD column comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    /// Supernova counts, per 1e6 solar masses
    BpassSupernova,
    /// Gravitational-wave mergers v2.2 (Bray), per 1e6 solar masses
    GwV22Bray,
    /// Gravitational-wave mergers v2.1 (Hobbs), per solar mass
    GwV21Hobbs,
    /// Gravitational-wave mergers v2.2 (Hobbs), per 1e6 solar masses
    GwV22Hobbs,
}

/// Normalisation and column layout of a [`ModelVariant`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantConfig {
    /// Population mass the raw counts refer to
    pub normalization_factor: f64,
    /// Event columns present in the variant's files
    pub column_names: &'static [EventType],
}

impl ModelVariant {
    pub const ALL: [ModelVariant; 4] = [
        ModelVariant::BpassSupernova,
        ModelVariant::GwV22Bray,
        ModelVariant::GwV21Hobbs,
        ModelVariant::GwV22Hobbs,
    ];

    pub fn config(self) -> VariantConfig {
        match self {
            ModelVariant::BpassSupernova => VariantConfig {
                normalization_factor: 1e6,
                column_names: &EventType::SUPERNOVA,
            },
            ModelVariant::GwV22Bray => VariantConfig {
                normalization_factor: 1e6,
                column_names: &EventType::MERGERS,
            },
            ModelVariant::GwV21Hobbs => VariantConfig {
                normalization_factor: 1.0,
                column_names: &EventType::MERGERS,
            },
            ModelVariant::GwV22Hobbs => VariantConfig {
                normalization_factor: 1e6,
                column_names: &EventType::MERGERS,
            },
        }
    }

    /// Whether the variant's files carry a column for `event`
    pub fn provides(self, event: EventType) -> bool {
        self.config().column_names.contains(&event)
    }
}

/// Convert raw per-bin event counts to events per year per solar mass
///
/// `raw[i] / factor / (width_gyr[i] * 1e9)` on the population age grid.
///
/// # Examples
///
/// ```rust
/// use kea_histogram::POPULATION_BINS;
/// use kea_rates::{normalize_counts, ModelVariant};
///
/// let counts = vec![1e6; POPULATION_BINS];
/// let dtd = normalize_counts(ModelVariant::BpassSupernova, &counts).unwrap();
///
/// // One event per solar mass in every age bin
/// let widths = dtd.bin_widths().to_vec();
/// assert!((dtd.integral(0.0, widths[0]).unwrap() - 1.0).abs() < 1e-9);
/// ```
pub fn normalize_counts(variant: ModelVariant, raw: &[f64]) -> Result<PopulationHistogram> {
    if raw.len() != POPULATION_BINS {
        return Err(Error::size_mismatch(POPULATION_BINS, raw.len()));
    }
    if raw.iter().any(|v| !v.is_finite()) {
        return Err(Error::non_finite("raw event counts"));
    }

    let factor = variant.config().normalization_factor;
    let empty = PopulationHistogram::zeros();
    let values = raw
        .iter()
        .zip(empty.bin_widths())
        .map(|(count, width)| count / factor / (width * 1e9))
        .collect();
    PopulationHistogram::new(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_variant_table() {
        assert_eq!(ModelVariant::BpassSupernova.config().normalization_factor, 1e6);
        assert_eq!(ModelVariant::GwV21Hobbs.config().normalization_factor, 1.0);
        assert!(ModelVariant::BpassSupernova.provides(EventType::LGRB));
        assert!(!ModelVariant::BpassSupernova.provides(EventType::BHBH));
        assert!(ModelVariant::GwV22Hobbs.provides(EventType::NSNS));
        assert!(ModelVariant::ALL.iter().all(|v| !v.provides(EventType::CCSN)));
    }

    #[test]
    fn test_normalisation_recovers_counts() {
        let raw: Vec<f64> = (0..POPULATION_BINS).map(|i| i as f64 * 10.0).collect();
        for variant in ModelVariant::ALL {
            let dtd = normalize_counts(variant, &raw).unwrap();
            let factor = variant.config().normalization_factor;
            for (i, w) in dtd.edges().windows(2).enumerate() {
                // Integral over a bin gives counts per solar mass
                assert_relative_eq!(
                    dtd.integral(w[0], w[1]).unwrap(),
                    raw[i] / factor,
                    max_relative = 1e-9
                );
            }
        }
    }

    #[test]
    fn test_rejects_bad_columns() {
        assert!(normalize_counts(ModelVariant::GwV22Bray, &[1.0; 50]).is_err());
        let mut raw = vec![0.0; POPULATION_BINS];
        raw[3] = f64::NAN;
        assert!(normalize_counts(ModelVariant::GwV22Bray, &raw).is_err());
    }

    #[test]
    fn test_serde_names() {
        let v: ModelVariant = serde_json::from_str("\"gw_v21_hobbs\"").unwrap();
        assert_eq!(v, ModelVariant::GwV21Hobbs);
    }
}
