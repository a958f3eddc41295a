//! Warehouse table exporter.
//!
//! One CSV file per table with a fixed header, rows in insertion order
//! (ascending for the incident set). No row-shape validation happens here:
//! a row the enrichment passes never touched exports its key with the
//! derived columns empty, keeping every file rectangular for the loader.

use std::{fmt::Write as _, fs, path::Path};

use custodia_core::warehouse::Warehouse;

use crate::{csv::escape_field, error::Result};

// ─── File names ──────────────────────────────────────────────────────────────

pub const PARTICIPANT_FILE: &str = "participant.csv";
pub const GUN_FILE: &str = "gun.csv";
pub const DATES_FILE: &str = "dates.csv";
pub const CUSTODY_FILE: &str = "custody.csv";
pub const INCIDENT_FILE: &str = "incident.csv";
pub const GEOGRAPHY_FILE: &str = "geography.csv";

// ─── Export ──────────────────────────────────────────────────────────────────

/// Write all six tables under `dir`, creating the directory if needed.
pub fn export_warehouse(
  warehouse: &Warehouse,
  dir: impl AsRef<Path>,
) -> Result<()> {
  let dir = dir.as_ref();
  fs::create_dir_all(dir)?;

  write_table(
    &dir.join(PARTICIPANT_FILE),
    &["age_group", "gender", "status", "type", "participant_id"],
    warehouse.participants.iter().map(|(key, r)| {
      vec![
        r.age_group.clone(),
        r.gender.clone(),
        r.status.clone(),
        r.kind.clone(),
        key.to_string(),
      ]
    }),
  )?;

  write_table(
    &dir.join(GUN_FILE),
    &["is_stolen", "gun_type", "gun_id"],
    warehouse
      .guns
      .iter()
      .map(|(key, r)| vec![r.stolen.clone(), r.kind.clone(), key.to_string()]),
  )?;

  write_table(
    &dir.join(DATES_FILE),
    &["date_id", "date", "day", "month", "year", "quarter", "week_day"],
    warehouse.dates.iter().map(|row| match &row.calendar {
      Some(c) => vec![
        row.date_id.to_string(),
        c.date.clone(),
        c.day.to_string(),
        c.month.to_string(),
        c.year.to_string(),
        c.quarter.to_string(),
        c.week_day.clone(),
      ],
      None => {
        let mut fields = vec![String::new(); 7];
        fields[0] = row.date_id.to_string();
        fields
      }
    }),
  )?;

  write_table(
    &dir.join(CUSTODY_FILE),
    &[
      "custody_id",
      "participant_id",
      "gun_id",
      "geo_id",
      "date_id",
      "crime_gravity",
      "incident_id",
    ],
    warehouse.custody.values().map(|r| {
      vec![
        r.custody_id.to_string(),
        r.participant_id.to_string(),
        r.gun_id.to_string(),
        r.geography_id.to_string(),
        r.date_id.to_string(),
        r.crime_gravity.to_string(),
        r.incident_id.to_string(),
      ]
    }),
  )?;

  write_table(
    &dir.join(INCIDENT_FILE),
    &["incident_id"],
    warehouse.incidents.iter().map(|id| vec![id.to_string()]),
  )?;

  write_table(
    &dir.join(GEOGRAPHY_FILE),
    &[
      "geography_id",
      "city",
      "country",
      "continent",
      "latitude",
      "longitude",
    ],
    warehouse.geography.iter().map(|row| {
      let (city, country, continent) = match &row.place {
        Some(p) => (p.city.clone(), p.country.clone(), p.continent.clone()),
        None => (String::new(), String::new(), String::new()),
      };
      vec![
        row.geography_id.to_string(),
        city,
        country,
        continent,
        row.point.latitude.to_string(),
        row.point.longitude.to_string(),
      ]
    }),
  )?;

  Ok(())
}

/// Write one table: header first, then rows, one line each.
fn write_table(
  path: &Path,
  header: &[&str],
  rows: impl Iterator<Item = Vec<String>>,
) -> Result<()> {
  let mut out = String::new();
  push_row(&mut out, header.iter().copied());
  for row in rows {
    push_row(&mut out, row.iter().map(String::as_str));
  }
  fs::write(path, out)?;
  Ok(())
}

fn push_row<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
  let line = fields.map(escape_field).collect::<Vec<_>>().join(",");
  // writing to a String cannot fail
  let _ = writeln!(out, "{line}");
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use custodia_core::{
    gravity::GravityFactors,
    record::{GeoPoint, GunRecord, ParticipantRecord, PoliceRecord},
    registry::Place,
  };

  use super::*;

  fn small_warehouse() -> Warehouse {
    let factors = GravityFactors {
      age:    HashMap::from([("Adult 18+".to_string(), 2.0)]),
      kind:   HashMap::from([("Victim".to_string(), 1.0)]),
      status: HashMap::from([("Injured".to_string(), 3.0)]),
    };
    let mut w = Warehouse::new();
    w.ingest(
      PoliceRecord {
        participant: ParticipantRecord {
          age_group: "Adult 18+".to_string(),
          gender:    "Female".to_string(),
          status:    "Injured".to_string(),
          kind:      "Victim".to_string(),
        },
        gun: GunRecord {
          stolen: "Unknown".to_string(),
          kind:   "Handgun".to_string(),
        },
        point: GeoPoint {
          latitude:  39.95,
          longitude: -75.17,
        },
        date_id:     812,
        incident_id: 461105,
        custody_id:  1,
      },
      &factors,
    )
    .unwrap();
    w
  }

  #[test]
  fn every_table_gets_a_file_with_its_header() {
    let dir = tempfile::tempdir().unwrap();
    export_warehouse(&small_warehouse(), dir.path()).unwrap();

    for (file, header) in [
      (PARTICIPANT_FILE, "age_group,gender,status,type,participant_id"),
      (GUN_FILE, "is_stolen,gun_type,gun_id"),
      (DATES_FILE, "date_id,date,day,month,year,quarter,week_day"),
      (
        CUSTODY_FILE,
        "custody_id,participant_id,gun_id,geo_id,date_id,crime_gravity,incident_id",
      ),
      (INCIDENT_FILE, "incident_id"),
      (
        GEOGRAPHY_FILE,
        "geography_id,city,country,continent,latitude,longitude",
      ),
    ] {
      let raw = fs::read_to_string(dir.path().join(file)).unwrap();
      assert_eq!(raw.lines().next().unwrap(), header, "header of {file}");
    }
  }

  #[test]
  fn custody_row_serializes_keys_and_gravity() {
    let dir = tempfile::tempdir().unwrap();
    export_warehouse(&small_warehouse(), dir.path()).unwrap();

    let raw = fs::read_to_string(dir.path().join(CUSTODY_FILE)).unwrap();
    assert_eq!(raw.lines().nth(1).unwrap(), "1,1,1,1,812,6,461105");
  }

  #[test]
  fn unenriched_rows_export_with_empty_derived_columns() {
    let dir = tempfile::tempdir().unwrap();
    export_warehouse(&small_warehouse(), dir.path()).unwrap();

    let dates = fs::read_to_string(dir.path().join(DATES_FILE)).unwrap();
    assert_eq!(dates.lines().nth(1).unwrap(), "812,,,,,,");

    let geography = fs::read_to_string(dir.path().join(GEOGRAPHY_FILE)).unwrap();
    assert_eq!(geography.lines().nth(1).unwrap(), "1,,,,39.95,-75.17");
  }

  #[test]
  fn enriched_geography_row_includes_the_place() {
    let dir = tempfile::tempdir().unwrap();
    let mut w = small_warehouse();
    let point = GeoPoint {
      latitude:  39.95,
      longitude: -75.17,
    };
    w.geography.row_mut(&point).unwrap().place = Some(Place {
      city:      "Philadelphia".to_string(),
      country:   "United States".to_string(),
      continent: "North America".to_string(),
    });
    export_warehouse(&w, dir.path()).unwrap();

    let raw = fs::read_to_string(dir.path().join(GEOGRAPHY_FILE)).unwrap();
    assert_eq!(
      raw.lines().nth(1).unwrap(),
      "1,Philadelphia,United States,North America,39.95,-75.17"
    );
  }
}
