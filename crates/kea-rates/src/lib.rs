//! Transient event rates from star-formation histories
//!
//! Stellar populations produce transients (supernovae, gamma-ray bursts,
//! compact-object mergers) with a delay after they form, described by a
//! delay-time distribution (DTD). This crate combines a star-formation rate
//! density history with DTDs to predict event rates over cosmic time:
//!
//! 1. [`calculate_mass_per_bin`] integrates the SFR density over the output
//!    lookback-time bins.
//! 2. [`calculate_event_rates`] convolves that mass with a DTD.
//! 3. [`calculate_event_rates_with_metallicity`] does the same while picking
//!    the DTD by the metallicity at formation.
//!
//! Larger runs go through [`DtdTable`] and [`EventRateTable`], which hold
//! one DTD (and one result) per metallicity bin and event type.
//!
//! # Example
//!
//! ```rust
//! use kea_core::{FitInterpolant, LinearSpline};
//! use kea_histogram::{PopulationHistogram, POPULATION_BINS};
//! use kea_rates::{calculate_event_rates, calculate_mass_per_bin, to_per_gpc3};
//!
//! // 0.01 Msun/yr/Mpc^3 for the past 13 Gyr
//! let sfrd = LinearSpline::fit(&[0.0, 13e9], &[0.01, 0.01]).unwrap();
//! let edges: Vec<f64> = (0..=13).map(f64::from).collect();
//! let mass = calculate_mass_per_bin(&edges, &sfrd).unwrap();
//!
//! let dtd = PopulationHistogram::new(vec![1e-13; POPULATION_BINS]).unwrap();
//! let rates = calculate_event_rates(&edges, &mass, &dtd).unwrap();
//! let per_gpc3 = to_per_gpc3(&rates);
//!
//! // Recent bins see all earlier populations
//! assert!(per_gpc3[0] > per_gpc3[12]);
//! ```
//!
//! # Features
//!
//! - `parallel`: rayon-parallel `par_*` variants of the convolution, used
//!   by [`EventRateTable`]

pub mod convolution;
pub mod dtd;
pub mod event;
pub mod mass;
pub mod metallicity;
pub mod sfrd;
pub mod table;
pub mod variant;

pub use convolution::{
    accumulate_events, accumulate_events_with_metallicity, calculate_event_rates,
    calculate_event_rates_with_metallicity, formation_metallicity_index, normalize_event_rates,
    to_per_gpc3,
};
#[cfg(feature = "parallel")]
pub use convolution::{
    par_accumulate_events, par_accumulate_events_with_metallicity, par_calculate_event_rates,
    par_calculate_event_rates_with_metallicity,
};
pub use dtd::{DtdTable, DtdTableBuilder};
pub use event::EventType;
pub use mass::calculate_mass_per_bin;
pub use metallicity::{
    MetallicityGrid, BPASS_METALLICITIES, BPASS_METALLICITY_EDGES, BPASS_METALLICITY_LABELS,
};
pub use sfrd::{metallicity_history, sfrd_by_metallicity, total_sfrd, GalaxySample, SfrdGrid};
pub use table::EventRateTable;
pub use variant::{normalize_counts, ModelVariant, VariantConfig};

pub use kea_core::{Error, Result};
