//! Error types for `custodia-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A gravity lookup label is absent from its factor table. Never silently
  /// defaulted: a miss means the reference feeds and the source disagree.
  #[error("unknown {factor} category: {label:?}")]
  UnknownCategory { factor: &'static str, label: String },

  /// The date feed references a key that was never ingested. Enrichment
  /// extends rows; it never creates them.
  #[error("date key {0} was never ingested")]
  UnknownDateKey(i64),

  #[error("malformed date value: {0:?}")]
  MalformedDate(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
