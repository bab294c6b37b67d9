//! Transient event rates from galaxy star-formation histories
//!
//! `kea` re-exports the workspace crates under one roof:
//!
//! - [`kea_core`]: errors, configuration, interpolation and numerics
//! - [`kea_histogram`]: binned containers with exact partial-bin integration
//! - [`kea_cosmology`]: lookback time, redshift and snapshot time relations
//! - [`kea_rates`]: DTD tables, SFRD aggregation and the event-rate convolution
//!
//! # Example
//!
//! ```rust
//! use kea::prelude::*;
//!
//! let config = RateConfig::default();
//! let edges = config.output_edges();
//!
//! let sfrd = LinearSpline::fit(&[0.0, 14e9], &[0.02, 0.005]).unwrap();
//! let mass = calculate_mass_per_bin(&edges, &sfrd).unwrap();
//!
//! let dtd = PopulationHistogram::new(vec![1e-12; POPULATION_BINS]).unwrap();
//! let rates = to_per_gpc3(&calculate_event_rates(&edges, &mass, &dtd).unwrap());
//! assert_eq!(rates.len(), config.nr_bins);
//!
//! let z_axis = redshift_edges(&config.cosmology, &config.redshift, &edges[..5]).unwrap();
//! assert_eq!(z_axis[0], 0.0);
//! ```

pub use kea_core;
pub use kea_cosmology;
pub use kea_histogram;
pub use kea_rates;

pub use kea_core::{Error, Result};

/// Commonly used types and functions
pub mod prelude {
    pub use kea_core::{
        Cosmology, FitInterpolant, Interpolant, LinearSpline, RateConfig, RedshiftSearch,
        SimulationVolume, NOW_GYR,
    };
    pub use kea_cosmology::{
        approximate_redshift, lookback_time, redshift_edges, TimeRelation,
    };
    pub use kea_histogram::{BinnedIntegral, Histogram, PopulationHistogram, POPULATION_BINS};
    pub use kea_rates::{
        calculate_event_rates, calculate_event_rates_with_metallicity, calculate_mass_per_bin,
        metallicity_history, normalize_counts, sfrd_by_metallicity, to_per_gpc3, total_sfrd,
        DtdTable, EventRateTable, EventType, GalaxySample, MetallicityGrid, ModelVariant,
    };
}
