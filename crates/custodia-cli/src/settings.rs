//! Runtime configuration.
//!
//! Deserialized from the TOML config file (plus `CUSTODIA_*` environment
//! overrides) by the `config` crate in `main`.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level shape of the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  pub build: BuildConfig,
  pub load:  LoadConfig,
}

/// Input feeds and output directory for the `build` subcommand.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
  /// The police incident-report feed.
  pub police_csv:      PathBuf,
  /// The date-reference XML feed.
  pub dates_xml:       PathBuf,
  /// Gravity factor tables, one JSON file per factor.
  pub age_factors:     PathBuf,
  pub type_factors:    PathBuf,
  pub status_factors:  PathBuf,
  /// Offline geocoding reference data.
  pub places_csv:      PathBuf,
  pub continents_json: PathBuf,
  /// Directory the exported tables are written into.
  pub out_dir:         PathBuf,
}

/// Paths for the `load` subcommand.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadConfig {
  /// Directory holding the exported tables (normally `build.out_dir`).
  pub tables_dir: PathBuf,
  /// The SQLite database file to load into.
  pub database:   PathBuf,
}
