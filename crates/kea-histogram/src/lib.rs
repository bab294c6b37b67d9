//! Binned containers with exact partial-bin integration
//!
//! This crate provides the histogram types the event-rate engine is built
//! on. A [`Histogram`] has fixed, strictly increasing edges and one mutable
//! value per bin; it answers bin lookups and integrates its step function
//! exactly between arbitrary points. A [`PopulationHistogram`] fixes the
//! edges to the 51-bin stellar-population age grid.
//!
//! # Examples
//!
//! ## Partial-bin integration
//!
//! ```rust
//! use kea_histogram::Histogram;
//!
//! let h = Histogram::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 2.0, 4.0]).unwrap();
//!
//! // Half of bin 0, all of bin 1, a quarter of bin 2
//! let area = h.integral(0.5, 2.25).unwrap();
//! assert_eq!(area, 0.5 + 2.0 + 1.0);
//!
//! // The final edge belongs to the last bin
//! assert_eq!(h.get_bin(3.0).unwrap(), 2);
//! assert!(h.get_bin(3.5).is_err());
//! ```
//!
//! ## Population age grid
//!
//! ```rust
//! use kea_histogram::{population, PopulationHistogram};
//!
//! let dtd = PopulationHistogram::new(vec![1e-10; 51]).unwrap();
//!
//! // Ages are in Gyr, rates per year: integrating 1 Gyr yields events per unit mass
//! let events = dtd.integral(0.0, 1.0).unwrap();
//! assert!((events - 0.1).abs() < 1e-12);
//!
//! assert_eq!(population::log_edges()[0], 5.95);
//! ```
//!
//! ## Scaling
//!
//! ```rust
//! use kea_histogram::Histogram;
//!
//! let mut h = Histogram::uniform(0.0, 10.0, 5).unwrap();
//! h[2] = 4.0;
//! let doubled = &h * 2.0;
//! h /= 4.0;
//! assert_eq!(doubled[2], 8.0);
//! assert_eq!(h[2], 1.0);
//! ```

pub mod ops;
pub mod population;
pub mod traits;
pub mod types;

// Re-export main types and traits
pub use population::{PopulationHistogram, POPULATION_BINS};
pub use traits::BinnedIntegral;
pub use types::Histogram;

pub use kea_core::{Error, Result};
