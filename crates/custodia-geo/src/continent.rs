//! Country → continent classification.

use std::{collections::HashMap, fs, path::Path};

use custodia_core::geocode::ContinentIndex;

use crate::error::Result;

/// Country-name → continent-name map loaded from a JSON object, e.g.
/// `{"Italy": "Europe", "United States": "North America"}`.
///
/// Lookup is case-insensitive on the country name; continent names are
/// returned exactly as stored.
pub struct ContinentTable {
  by_country: HashMap<String, String>,
}

impl ContinentTable {
  pub fn new(map: HashMap<String, String>) -> Self {
    Self {
      by_country: map
        .into_iter()
        .map(|(country, continent)| (country.to_lowercase(), continent))
        .collect(),
    }
  }

  /// Load the classification map from a file on disk.
  pub fn read_file(path: impl AsRef<Path>) -> Result<Self> {
    Ok(Self::new(serde_json::from_str(&fs::read_to_string(path)?)?))
  }
}

impl ContinentIndex for ContinentTable {
  fn continent(&self, country: &str) -> Option<String> {
    self.by_country.get(&country.to_lowercase()).cloned()
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
