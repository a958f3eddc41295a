//! Error types for the `custodia-feeds` codecs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("source feed has no header line")]
  EmptyFeed,

  #[error("missing column {0:?} in source header")]
  MissingColumn(String),

  /// An unparseable numeric field. Fatal to the batch: every downstream key
  /// depends on the completeness of the ingested rows.
  #[error("line {line}: malformed {column} value {value:?}")]
  MalformedRow {
    line:   usize,
    column: &'static str,
    value:  String,
  },

  #[error("XML error: {0}")]
  Xml(String),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
