//! Error types for `custodia-load`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("exported table {0} has no header line")]
  EmptyTable(String),

  #[error("table {table} line {line}: expected {expected} fields, got {got}")]
  RowShape {
    table:    String,
    line:     usize,
    expected: usize,
    got:      usize,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
