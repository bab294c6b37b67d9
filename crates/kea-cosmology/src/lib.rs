//! Cosmological time conversions for event-rate axes
//!
//! Event rates are computed against lookback time. This crate converts
//! between lookback time and redshift for a flat or curved FLRW background
//! and holds the snapshot time relation of the simulation the star-formation
//! histories come from.
//!
//! # Example
//!
//! ```rust
//! use kea_core::{Cosmology, RedshiftSearch};
//! use kea_cosmology::{lookback_time, redshift_edges};
//!
//! let cosmology = Cosmology::millennium();
//! let t = lookback_time(&cosmology, 3.0).unwrap();
//! assert!(t > 10.0 && t < 13.0);
//!
//! let axis = redshift_edges(&cosmology, &RedshiftSearch::default(), &[0.0, 5.0, 10.0]).unwrap();
//! assert_eq!(axis[0], 0.0);
//! assert!(axis[2] > axis[1]);
//! ```

pub mod lookback;
pub mod redshift;
pub mod time_relation;

pub use lookback::{age_of_universe, lookback_time};
pub use redshift::{approximate_redshift, approximate_redshift_with, redshift_edges, RedshiftEstimate};
pub use time_relation::TimeRelation;
