//! Police source-feed reader.
//!
//! Comma-delimited with a header line naming at least the eleven columns the
//! warehouse consumes; extra columns are ignored, and column order is taken
//! from the header rather than assumed.

use std::{fs, path::Path};

use custodia_core::record::{
  GeoPoint, GunRecord, ParticipantRecord, PoliceRecord,
};

use crate::{
  csv::split_fields,
  error::{Error, Result},
};

// ─── Header resolution ───────────────────────────────────────────────────────

/// Column offsets resolved from the header line.
struct Header {
  age_group:   usize,
  gender:      usize,
  status:      usize,
  kind:        usize,
  latitude:    usize,
  longitude:   usize,
  gun_stolen:  usize,
  gun_type:    usize,
  date_fk:     usize,
  incident_id: usize,
  custody_id:  usize,
}

impl Header {
  fn resolve(line: &str) -> Result<Self> {
    let names = split_fields(line);
    let find = |name: &str| -> Result<usize> {
      names
        .iter()
        .position(|n| n.trim() == name)
        .ok_or_else(|| Error::MissingColumn(name.to_string()))
    };
    Ok(Self {
      age_group:   find("participant_age_group")?,
      gender:      find("participant_gender")?,
      status:      find("participant_status")?,
      kind:        find("participant_type")?,
      latitude:    find("latitude")?,
      longitude:   find("longitude")?,
      gun_stolen:  find("gun_stolen")?,
      gun_type:    find("gun_type")?,
      date_fk:     find("date_fk")?,
      incident_id: find("incident_id")?,
      custody_id:  find("custody_id")?,
    })
  }
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Read and parse the police feed from a file on disk.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<PoliceRecord>> {
  parse(&fs::read_to_string(path)?)
}

/// Parse the police feed. The first non-empty line is the header; blank
/// lines elsewhere are skipped.
pub fn parse(input: &str) -> Result<Vec<PoliceRecord>> {
  let mut header: Option<Header> = None;
  let mut records = Vec::new();

  for (idx, line) in input.lines().enumerate() {
    if line.trim().is_empty() {
      continue;
    }
    if let Some(h) = &header {
      records.push(parse_row(h, idx + 1, line)?);
    } else {
      header = Some(Header::resolve(line)?);
    }
  }

  if header.is_none() {
    return Err(Error::EmptyFeed);
  }
  Ok(records)
}

// ─── Row parsing ─────────────────────────────────────────────────────────────

fn parse_row(
  header: &Header,
  line_no: usize,
  line: &str,
) -> Result<PoliceRecord> {
  let fields = split_fields(line);
  let field =
    |idx: usize| -> &str { fields.get(idx).map(String::as_str).unwrap_or("") };

  Ok(PoliceRecord {
    participant: ParticipantRecord {
      age_group: field(header.age_group).to_string(),
      gender:    field(header.gender).to_string(),
      status:    field(header.status).to_string(),
      kind:      field(header.kind).to_string(),
    },
    gun: GunRecord {
      stolen: field(header.gun_stolen).to_string(),
      kind:   field(header.gun_type).to_string(),
    },
    point: GeoPoint {
      latitude:  parse_num(line_no, "latitude", field(header.latitude))?,
      longitude: parse_num(line_no, "longitude", field(header.longitude))?,
    },
    date_id:     parse_num(line_no, "date_fk", field(header.date_fk))?,
    incident_id: parse_num(line_no, "incident_id", field(header.incident_id))?,
    custody_id:  parse_num(line_no, "custody_id", field(header.custody_id))?,
  })
}

/// Parse a numeric field; failure is fatal to the batch.
fn parse_num<T: std::str::FromStr>(
  line: usize,
  column: &'static str,
  value: &str,
) -> Result<T> {
  value.trim().parse().map_err(|_| Error::MalformedRow {
    line,
    column,
    value: value.to_string(),
  })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
