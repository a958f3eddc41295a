//! Error types for `custodia-geo`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("places line {line}: malformed {column} value {value:?}")]
  MalformedPlace {
    line:   usize,
    column: &'static str,
    value:  String,
  },

  /// A geocoder that can never match anything is a configuration error,
  /// not a sequence of soft per-point misses.
  #[error("places dataset is empty")]
  EmptyDataset,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
