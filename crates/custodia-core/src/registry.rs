//! Deduplicating dimension tables.
//!
//! Three table shapes cover the four dimensions: [`DimensionTable`] for the
//! generated-key dimensions (participant, gun), [`GeoTable`] for geography
//! (keyed by the raw coordinate pair), and [`DateTable`] for dates (natural
//! keys supplied by the source). All three preserve insertion order; the
//! exporter iterates them as-is.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::record::GeoPoint;

// ─── Generated-key dimensions ────────────────────────────────────────────────

/// A generated-key dimension table.
///
/// Rows are stored in insertion order; a reverse index over the attribute
/// tuple makes dedup O(1). Surrogate keys are densely assigned from 1 by a
/// single incrementing counter. Rows are never removed, so `len + 1` *is*
/// that counter, and always equals `max(key) + 1`.
#[derive(Debug)]
pub struct DimensionTable<R> {
  rows:  IndexMap<u32, R>,
  index: HashMap<R, u32>,
}

impl<R> Default for DimensionTable<R> {
  fn default() -> Self {
    Self {
      rows:  IndexMap::new(),
      index: HashMap::new(),
    }
  }
}

impl<R> DimensionTable<R>
where
  R: Clone + Eq + std::hash::Hash,
{
  pub fn new() -> Self {
    Self::default()
  }

  /// Return the key of an existing row whose attribute tuple equals
  /// `record`, or assign the next surrogate key and store the row.
  ///
  /// Idempotent: inserting the same candidate twice yields the same key and
  /// leaves the table size unchanged.
  pub fn lookup_or_insert(&mut self, record: R) -> u32 {
    if let Some(&key) = self.index.get(&record) {
      return key;
    }
    let key = self.rows.len() as u32 + 1;
    self.index.insert(record.clone(), key);
    self.rows.insert(key, record);
    key
  }

  pub fn get(&self, key: u32) -> Option<&R> {
    self.rows.get(&key)
  }

  pub fn contains_key(&self, key: u32) -> bool {
    self.rows.contains_key(&key)
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// Iterate `(key, row)` pairs in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = (u32, &R)> {
    self.rows.iter().map(|(k, r)| (*k, r))
  }
}

// ─── Geography ───────────────────────────────────────────────────────────────

/// A resolved place, filled in by the geography enrichment pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
  pub city:      String,
  pub country:   String,
  pub continent: String,
}

/// One geography row. `place` stays `None` until enrichment resolves the
/// coordinate; the key assigned at ingestion time never changes.
#[derive(Debug, Clone)]
pub struct GeoRow {
  pub geography_id: u32,
  pub point:        GeoPoint,
  pub place:        Option<Place>,
}

/// The geography dimension, keyed by the raw coordinate pair rather than by
/// full-row equality. One entry per distinct pair.
#[derive(Debug, Default)]
pub struct GeoTable {
  rows: IndexMap<GeoPoint, GeoRow>,
}

impl GeoTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Return the key of an existing entry for `point`, or assign the next
  /// surrogate key and insert a bare (unenriched) row.
  pub fn lookup_or_insert(&mut self, point: GeoPoint) -> u32 {
    if let Some(row) = self.rows.get(&point) {
      return row.geography_id;
    }
    let key = self.rows.len() as u32 + 1;
    self.rows.insert(point, GeoRow {
      geography_id: key,
      point,
      place: None,
    });
    key
  }

  pub fn get(&self, point: &GeoPoint) -> Option<&GeoRow> {
    self.rows.get(point)
  }

  pub fn row_mut(&mut self, point: &GeoPoint) -> Option<&mut GeoRow> {
    self.rows.get_mut(point)
  }

  pub fn contains_key(&self, geography_id: u32) -> bool {
    self.rows.values().any(|r| r.geography_id == geography_id)
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// Iterate the distinct coordinate pairs in insertion order.
  pub fn points(&self) -> impl Iterator<Item = GeoPoint> + '_ {
    self.rows.keys().copied()
  }

  /// Iterate rows in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = &GeoRow> {
    self.rows.values()
  }
}

// ─── Dates ───────────────────────────────────────────────────────────────────

/// Calendar attributes derived from the date-reference feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
  /// Canonical `YYYYMMDD` rendering of the feed's date string.
  pub date:     String,
  pub day:      u32,
  pub month:    u32,
  pub year:     i32,
  /// Calendar quarter, 1–4.
  pub quarter:  u32,
  /// Full English weekday name, e.g. "Wednesday".
  pub week_day: String,
}

/// One date row. `calendar` stays `None` until the date enrichment pass
/// expands the key using the reference feed.
#[derive(Debug, Clone)]
pub struct DateRow {
  pub date_id:  i64,
  pub calendar: Option<CalendarDay>,
}

/// The date dimension. Keys are natural — supplied by the source, never
/// generated here.
#[derive(Debug, Default)]
pub struct DateTable {
  rows: IndexMap<i64, DateRow>,
}

impl DateTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert a bare row for `date_id` and return the key.
  ///
  /// Idempotent: re-inserting an existing key leaves its row (including any
  /// enrichment already applied) unchanged.
  pub fn insert(&mut self, date_id: i64) -> i64 {
    self.rows.entry(date_id).or_insert(DateRow {
      date_id,
      calendar: None,
    });
    date_id
  }

  pub fn get(&self, date_id: i64) -> Option<&DateRow> {
    self.rows.get(&date_id)
  }

  pub fn get_mut(&mut self, date_id: i64) -> Option<&mut DateRow> {
    self.rows.get_mut(&date_id)
  }

  pub fn contains_key(&self, date_id: i64) -> bool {
    self.rows.contains_key(&date_id)
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// Iterate rows in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = &DateRow> {
    self.rows.values()
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
