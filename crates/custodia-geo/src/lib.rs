//! Offline geocoding for Custodia.
//!
//! Implements the `custodia-core` geocoding traits from two local reference
//! files: a places CSV for nearest-match reverse geocoding and a
//! country→continent JSON map. No network is involved; the warehouse build
//! stays a purely local batch job.

pub mod continent;
pub mod dataset;
pub mod error;

pub use continent::ContinentTable;
pub use dataset::OfflineGeocoder;
pub use error::{Error, Result};
