//! Post-ingestion enrichment passes.
//!
//! Both passes mutate existing rows in place and never create or remove
//! rows. Date enrichment is fatal on any inconsistency (an unknown key means
//! the feeds disagree); geography enrichment fails softly per entry and
//! reports what it skipped.

use chrono::{Datelike, NaiveDate};

use crate::{
  Error, Result,
  geocode::{ContinentIndex, ReverseGeocoder},
  record::GeoPoint,
  registry::{CalendarDay, DateTable, GeoTable, Place},
};

// ─── Date enrichment ─────────────────────────────────────────────────────────

/// One (natural key, date string) pair from the date-reference feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFeedEntry {
  pub date_id: i64,
  pub date:    String,
}

/// Expand every feed entry into calendar attributes on its already-ingested
/// date row.
///
/// Rows are extended, never created: a feed key that was not ingested is an
/// [`Error::UnknownDateKey`] and aborts the pass.
pub fn enrich_dates(table: &mut DateTable, feed: &[DateFeedEntry]) -> Result<()> {
  for entry in feed {
    let calendar = calendar_day(&entry.date)?;
    let row = table
      .get_mut(entry.date_id)
      .ok_or(Error::UnknownDateKey(entry.date_id))?;
    row.calendar = Some(calendar);
  }
  Ok(())
}

/// Normalize `raw` to `YYYYMMDD` and derive the calendar attributes.
///
/// Accepts `-` or `/` separators and ignores any time component after the
/// date portion.
fn calendar_day(raw: &str) -> Result<CalendarDay> {
  let date_part = raw.split_whitespace().next().unwrap_or("");
  let compact: String = date_part
    .chars()
    .filter(|c| *c != '-' && *c != '/')
    .collect();
  let parsed = NaiveDate::parse_from_str(&compact, "%Y%m%d")
    .map_err(|_| Error::MalformedDate(raw.to_string()))?;

  let month = parsed.month();
  Ok(CalendarDay {
    date: compact,
    day: parsed.day(),
    month,
    year: parsed.year(),
    quarter: (month - 1) / 3 + 1,
    week_day: parsed.format("%A").to_string(),
  })
}

// ─── Geography enrichment ────────────────────────────────────────────────────

/// Why a geography entry was left unenriched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
  /// The geocoder returned no match for the coordinate.
  NoMatch,
  /// The geocoder matched, but the country has no continent mapping.
  UnknownCountry(String),
}

impl std::fmt::Display for UnresolvedReason {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::NoMatch => write!(f, "no geocoder match"),
      Self::UnknownCountry(country) => {
        write!(f, "no continent mapping for {country:?}")
      }
    }
  }
}

/// A geography entry the enrichment pass could not resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedPlace {
  pub point:  GeoPoint,
  pub reason: UnresolvedReason,
}

/// Batch-resolve every distinct coordinate in `table` to a place and
/// continent, mutating rows in place.
///
/// Failures are soft and per-entry: unresolved rows keep their
/// pre-enrichment form and are returned for the caller to report. The key
/// assigned at ingestion time is never touched.
pub fn enrich_geography<G, C>(
  table: &mut GeoTable,
  geocoder: &G,
  continents: &C,
) -> Vec<UnresolvedPlace>
where
  G: ReverseGeocoder + ?Sized,
  C: ContinentIndex + ?Sized,
{
  let points: Vec<GeoPoint> = table.points().collect();
  let matches = geocoder.resolve(&points);

  let mut unresolved = Vec::new();
  for (point, resolved) in points.into_iter().zip(matches) {
    let Some(resolved) = resolved else {
      unresolved.push(UnresolvedPlace {
        point,
        reason: UnresolvedReason::NoMatch,
      });
      continue;
    };
    let Some(continent) = continents.continent(&resolved.country) else {
      unresolved.push(UnresolvedPlace {
        point,
        reason: UnresolvedReason::UnknownCountry(resolved.country),
      });
      continue;
    };
    if let Some(row) = table.row_mut(&point) {
      row.place = Some(Place {
        city: resolved.city,
        country: resolved.country,
        continent,
      });
    }
  }
  unresolved
}

// ─── Tests ───────────────────────────────────────────────────────────────────
