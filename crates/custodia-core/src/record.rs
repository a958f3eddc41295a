//! Source-row record types.
//!
//! Each line of the police feed splits into four dimension sub-records plus
//! the fact-level identifiers. Dimension records derive `Hash`/`Eq` over
//! their full attribute tuple; that equality is the deduplication criterion
//! the registry uses, so every field participates.

// ─── Dimension sub-records ───────────────────────────────────────────────────

/// The participant dimension attributes of one source row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipantRecord {
  pub age_group: String,
  pub gender:    String,
  pub status:    String,
  /// Participant type label (e.g. "Victim", "Subject-Suspect").
  pub kind:      String,
}

/// The gun dimension attributes of one source row.
///
/// `stolen` is kept as the source string; the feed carries values like
/// "Stolen" / "Not-stolen" / "Unknown", not a clean boolean.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GunRecord {
  pub stolen: String,
  pub kind:   String,
}

/// A raw coordinate pair.
///
/// Geography rows are keyed by the pair exactly as it appeared in the
/// source, so identity is the f64 bit pattern, not numeric closeness. Two
/// textually different renderings of the same location stay distinct rows,
/// matching the source semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
  pub latitude:  f64,
  pub longitude: f64,
}

impl GeoPoint {
  fn bits(&self) -> (u64, u64) {
    (self.latitude.to_bits(), self.longitude.to_bits())
  }
}

impl Eq for GeoPoint {}

impl std::hash::Hash for GeoPoint {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
    self.bits().hash(state);
  }
}

// ─── Full source row ─────────────────────────────────────────────────────────

/// One fully-parsed police record, ready for [`crate::warehouse::Warehouse::ingest`].
#[derive(Debug, Clone)]
pub struct PoliceRecord {
  pub participant: ParticipantRecord,
  pub gun:         GunRecord,
  pub point:       GeoPoint,
  /// Natural key into the date dimension, supplied by the source.
  pub date_id:     i64,
  pub incident_id: i64,
  pub custody_id:  i64,
}
