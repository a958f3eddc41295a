//! Feed codecs for Custodia.
//!
//! Readers for the three input feeds (police CSV, dates XML, gravity-factor
//! JSON) and the writer for the exported warehouse tables. Pure synchronous;
//! no database dependencies.

pub mod csv;
pub mod dates;
pub mod error;
pub mod factors;
pub mod police;
pub mod serialize;

pub use error::{Error, Result};
