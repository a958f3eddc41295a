//! Pipeline orchestration for the `custodia` binary.
//!
//! Kept as a library so the end-to-end tests can drive the exact code paths
//! the binary runs.

pub mod job;
pub mod settings;

pub use job::{run_build, run_load};
pub use settings::{BuildConfig, LoadConfig, Settings};
