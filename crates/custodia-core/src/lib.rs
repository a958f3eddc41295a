//! Core types and pipeline stages for the Custodia warehouse builder.
//!
//! This crate is deliberately free of file-format and database dependencies.
//! Feed codecs live in `custodia-feeds`, geocoding reference data in
//! `custodia-geo`, persistence in `custodia-load`; all of them depend on the
//! types defined here.

pub mod enrich;
pub mod error;
pub mod geocode;
pub mod gravity;
pub mod record;
pub mod registry;
pub mod warehouse;

pub use error::{Error, Result};
