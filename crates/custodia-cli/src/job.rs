//! The `build` and `load` jobs.
//!
//! Stages run in strict sequence: ingest → enrich dates → enrich geography →
//! export → (separately) load. Any fatal error aborts before a single table
//! file is written; geocoding misses are warnings, not failures.

use anyhow::Context as _;
use custodia_core::{enrich, warehouse::Warehouse};
use custodia_feeds::{dates, factors, police, serialize};
use custodia_geo::{ContinentTable, OfflineGeocoder};
use custodia_load::SqliteWarehouse;
use tracing::{info, warn};

use crate::settings::{BuildConfig, LoadConfig};

/// Run the full ETL: ingest the police feed, enrich, export the tables.
///
/// Returns the built warehouse so callers (and tests) can inspect it.
pub fn run_build(cfg: &BuildConfig) -> anyhow::Result<Warehouse> {
  let factors = factors::read_factors(
    &cfg.age_factors,
    &cfg.type_factors,
    &cfg.status_factors,
  )
  .context("loading gravity factor tables")?;

  let records =
    police::read_file(&cfg.police_csv).context("reading police feed")?;
  info!(rows = records.len(), "police feed parsed");

  let mut warehouse = Warehouse::new();
  for record in records {
    warehouse
      .ingest(record, &factors)
      .context("ingesting police records")?;
  }
  info!(
    participants = warehouse.participants.len(),
    guns = warehouse.guns.len(),
    geographies = warehouse.geography.len(),
    dates = warehouse.dates.len(),
    incidents = warehouse.incidents.len(),
    custody = warehouse.custody.len(),
    "ingestion complete"
  );

  let date_feed =
    dates::read_file(&cfg.dates_xml).context("reading date feed")?;
  enrich::enrich_dates(&mut warehouse.dates, &date_feed)
    .context("enriching date dimension")?;

  let geocoder = OfflineGeocoder::read_file(&cfg.places_csv)
    .context("loading places dataset")?;
  let continents = ContinentTable::read_file(&cfg.continents_json)
    .context("loading continent map")?;
  let unresolved =
    enrich::enrich_geography(&mut warehouse.geography, &geocoder, &continents);
  for entry in &unresolved {
    warn!(
      latitude = entry.point.latitude,
      longitude = entry.point.longitude,
      reason = %entry.reason,
      "geography entry left unenriched"
    );
  }

  serialize::export_warehouse(&warehouse, &cfg.out_dir)
    .context("exporting tables")?;
  info!(dir = %cfg.out_dir.display(), "tables exported");

  Ok(warehouse)
}

/// Bulk-load previously exported tables into SQLite.
pub fn run_load(cfg: &LoadConfig) -> anyhow::Result<()> {
  let mut db =
    SqliteWarehouse::open(&cfg.database).context("opening database")?;
  db.load_dir(&cfg.tables_dir).context("loading tables")?;
  info!(database = %cfg.database.display(), "load complete");
  Ok(())
}
