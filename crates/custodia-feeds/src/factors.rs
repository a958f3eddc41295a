//! Gravity factor-weight reference feeds.
//!
//! Three JSON objects, each mapping a category label to a numeric weight,
//! e.g. `{"Adult 18+": 1, "Teen 12-17": 2}`.

use std::{collections::HashMap, fs, path::Path};

use custodia_core::gravity::GravityFactors;

use crate::error::Result;

/// Parse one factor table from a JSON object string.
pub fn parse_table(raw: &str) -> Result<HashMap<String, f64>> {
  Ok(serde_json::from_str(raw)?)
}

/// Load one factor table from a file on disk.
pub fn read_table(path: impl AsRef<Path>) -> Result<HashMap<String, f64>> {
  parse_table(&fs::read_to_string(path)?)
}

/// Load the age / type / status tables into a [`GravityFactors`].
pub fn read_factors(
  age: impl AsRef<Path>,
  kind: impl AsRef<Path>,
  status: impl AsRef<Path>,
) -> Result<GravityFactors> {
  Ok(GravityFactors {
    age:    read_table(age)?,
    kind:   read_table(kind)?,
    status: read_table(status)?,
  })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn integer_and_float_weights_both_parse() {
    let table =
      parse_table(r#"{"Adult 18+": 1, "Teen 12-17": 2.5}"#).unwrap();
    assert_eq!(table["Adult 18+"], 1.0);
    assert_eq!(table["Teen 12-17"], 2.5);
  }

  #[test]
  fn non_numeric_weight_is_an_error() {
    assert!(parse_table(r#"{"Adult 18+": "high"}"#).is_err());
  }
}
