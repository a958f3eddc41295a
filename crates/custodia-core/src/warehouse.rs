//! The in-memory warehouse and the fact-assembly pass.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::{
  Result,
  gravity::GravityFactors,
  record::{GunRecord, ParticipantRecord, PoliceRecord},
  registry::{DateTable, DimensionTable, GeoTable},
};

// ─── Fact record ─────────────────────────────────────────────────────────────

/// One row of the custody fact table: the four dimension keys, the derived
/// gravity measure, and the incident identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct CustodyRecord {
  pub custody_id:     i64,
  pub participant_id: u32,
  pub gun_id:         u32,
  pub geography_id:   u32,
  pub date_id:        i64,
  pub crime_gravity:  f64,
  pub incident_id:    i64,
}

// ─── Warehouse ───────────────────────────────────────────────────────────────

/// All six tables of the star schema, owned together so a single
/// [`Warehouse::ingest`] call can thread dimension keys into the fact row.
///
/// Lifecycle: populated by one sequential ingestion pass, mutated in place by
/// the two enrichment passes in [`crate::enrich`], then read-only for export.
/// Nothing is ever deleted.
#[derive(Debug, Default)]
pub struct Warehouse {
  pub participants: DimensionTable<ParticipantRecord>,
  pub guns:         DimensionTable<GunRecord>,
  pub geography:    GeoTable,
  pub dates:        DateTable,
  pub incidents:    BTreeSet<i64>,
  pub custody:      IndexMap<i64, CustodyRecord>,
}

impl Warehouse {
  pub fn new() -> Self {
    Self::default()
  }

  /// Ingest one source row: score gravity, insert into all four dimensions,
  /// and assemble the custody record, all in one pass.
  ///
  /// A custody id seen twice keeps the later record (last write wins); the
  /// incident set deduplicates by membership. Gravity is scored before any
  /// table is touched, so a scoring failure leaves the warehouse unchanged.
  pub fn ingest(
    &mut self,
    record: PoliceRecord,
    factors: &GravityFactors,
  ) -> Result<()> {
    let crime_gravity = factors.score(&record.participant)?;

    let participant_id = self.participants.lookup_or_insert(record.participant);
    let gun_id = self.guns.lookup_or_insert(record.gun);
    let geography_id = self.geography.lookup_or_insert(record.point);
    let date_id = self.dates.insert(record.date_id);

    self.incidents.insert(record.incident_id);

    self.custody.insert(record.custody_id, CustodyRecord {
      custody_id: record.custody_id,
      participant_id,
      gun_id,
      geography_id,
      date_id,
      crime_gravity,
      incident_id: record.incident_id,
    });
    Ok(())
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;
  use crate::record::GeoPoint;

  fn factors() -> GravityFactors {
    GravityFactors {
      age:    HashMap::from([("Adult 18+".to_string(), 3.0)]),
      kind:   HashMap::from([("Subject-Suspect".to_string(), 1.5)]),
      status: HashMap::from([("Arrested".to_string(), 4.0)]),
    }
  }

  fn record(custody_id: i64, incident_id: i64) -> PoliceRecord {
    PoliceRecord {
      participant: ParticipantRecord {
        age_group: "Adult 18+".to_string(),
        gender:    "Male".to_string(),
        status:    "Arrested".to_string(),
        kind:      "Subject-Suspect".to_string(),
      },
      gun: GunRecord {
        stolen: "Stolen".to_string(),
        kind:   "Handgun".to_string(),
      },
      point: GeoPoint {
        latitude:  39.95,
        longitude: -75.17,
      },
      date_id: 812,
      incident_id,
      custody_id,
    }
  }

  #[test]
  fn identical_attributes_share_dimension_keys() {
    let mut w = Warehouse::new();
    let f = factors();
    w.ingest(record(1001, 55), &f).unwrap();
    w.ingest(record(1002, 55), &f).unwrap();

    assert_eq!(w.participants.len(), 1);
    assert_eq!(w.guns.len(), 1);
    assert_eq!(w.geography.len(), 1);
    assert_eq!(w.dates.len(), 1);
    assert_eq!(w.custody.len(), 2);

    let a = &w.custody[&1001];
    let b = &w.custody[&1002];
    assert_eq!(a.participant_id, b.participant_id);
    assert_eq!(a.gun_id, b.gun_id);
    assert_eq!(a.geography_id, b.geography_id);
    assert_eq!(a.date_id, b.date_id);
  }

  #[test]
  fn duplicate_custody_id_is_last_write_wins() {
    let mut w = Warehouse::new();
    let f = factors();
    w.ingest(record(1001, 55), &f).unwrap();
    let mut newer = record(1001, 77);
    newer.gun.kind = "Rifle".to_string();
    w.ingest(newer, &f).unwrap();

    assert_eq!(w.custody.len(), 1);
    let row = &w.custody[&1001];
    assert_eq!(row.incident_id, 77);
    assert_eq!(row.gun_id, 2, "later record references the new gun row");
  }

  #[test]
  fn incident_set_tracks_distinct_ids() {
    let mut w = Warehouse::new();
    let f = factors();
    w.ingest(record(1, 55), &f).unwrap();
    w.ingest(record(2, 55), &f).unwrap();
    w.ingest(record(3, 56), &f).unwrap();
    assert_eq!(w.incidents.len(), 2);
    assert!(w.incidents.contains(&55) && w.incidents.contains(&56));
  }

  #[test]
  fn gravity_failure_leaves_warehouse_unchanged() {
    let mut w = Warehouse::new();
    let f = factors();
    let mut bad = record(1, 55);
    bad.participant.age_group = "Elder 90+".to_string();
    assert!(w.ingest(bad, &f).is_err());
    assert!(w.participants.is_empty());
    assert!(w.custody.is_empty());
    assert!(w.incidents.is_empty());
  }

  #[test]
  fn fact_rows_reference_existing_dimension_rows() {
    let mut w = Warehouse::new();
    let f = factors();
    w.ingest(record(1, 55), &f).unwrap();
    let mut other = record(2, 56);
    other.point = GeoPoint {
      latitude:  40.71,
      longitude: -74.00,
    };
    other.date_id = 813;
    w.ingest(other, &f).unwrap();

    for row in w.custody.values() {
      assert!(w.participants.contains_key(row.participant_id));
      assert!(w.guns.contains_key(row.gun_id));
      assert!(w.geography.contains_key(row.geography_id));
      assert!(w.dates.contains_key(row.date_id));
      assert!(w.incidents.contains(&row.incident_id));
    }
  }
}
