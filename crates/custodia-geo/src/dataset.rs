//! The offline places index.

use std::{fs, path::Path};

use custodia_core::{
  geocode::{GeoMatch, ReverseGeocoder},
  record::GeoPoint,
};
use custodia_feeds::csv::split_fields;

use crate::error::{Error, Result};

// ─── Reference rows ──────────────────────────────────────────────────────────

/// One row of the places reference CSV
/// (`city,country,latitude,longitude`, header line first).
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceEntry {
  pub city:      String,
  pub country:   String,
  pub latitude:  f64,
  pub longitude: f64,
}

// ─── Geocoder ────────────────────────────────────────────────────────────────

/// Nearest-match reverse geocoder over a fixed set of known places.
///
/// Lookup is a linear scan with an equirectangular distance approximation;
/// the reference dataset is thousands of rows, not millions, and the scan
/// runs once per distinct coordinate pair.
pub struct OfflineGeocoder {
  places: Vec<PlaceEntry>,
}

impl OfflineGeocoder {
  /// Build from already-parsed entries. Empty datasets are rejected.
  pub fn new(places: Vec<PlaceEntry>) -> Result<Self> {
    if places.is_empty() {
      return Err(Error::EmptyDataset);
    }
    Ok(Self { places })
  }

  /// Load the places reference CSV from a file on disk.
  pub fn read_file(path: impl AsRef<Path>) -> Result<Self> {
    Self::new(parse_places(&fs::read_to_string(path)?)?)
  }

  fn nearest(&self, point: GeoPoint) -> &PlaceEntry {
    // places is non-empty by construction
    self
      .places
      .iter()
      .min_by(|a, b| {
        distance2(point, a)
          .partial_cmp(&distance2(point, b))
          .unwrap_or(std::cmp::Ordering::Equal)
      })
      .expect("non-empty dataset")
  }
}

impl ReverseGeocoder for OfflineGeocoder {
  fn resolve(&self, points: &[GeoPoint]) -> Vec<Option<GeoMatch>> {
    points
      .iter()
      .map(|p| {
        if !p.latitude.is_finite() || !p.longitude.is_finite() {
          return None;
        }
        let place = self.nearest(*p);
        Some(GeoMatch {
          city:    place.city.clone(),
          country: place.country.clone(),
        })
      })
      .collect()
  }
}

/// Squared equirectangular distance in degrees, with the longitude delta
/// scaled by the cosine of the mean latitude. Only used to rank candidates,
/// never as a true distance.
fn distance2(point: GeoPoint, place: &PlaceEntry) -> f64 {
  let mean_lat = ((point.latitude + place.latitude) / 2.0).to_radians();
  let dlat = point.latitude - place.latitude;
  let dlon = (point.longitude - place.longitude) * mean_lat.cos();
  dlat * dlat + dlon * dlon
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// Parse the reference CSV. The first non-empty line is the header and is
/// skipped; field order is fixed.
pub fn parse_places(input: &str) -> Result<Vec<PlaceEntry>> {
  let mut entries = Vec::new();
  let mut saw_header = false;

  for (idx, line) in input.lines().enumerate() {
    if line.trim().is_empty() {
      continue;
    }
    if !saw_header {
      saw_header = true;
      continue;
    }
    let fields = split_fields(line);
    let field = |i: usize| -> &str {
      fields.get(i).map(String::as_str).unwrap_or("")
    };
    let num = |column: &'static str, raw: &str| -> Result<f64> {
      raw.trim().parse().map_err(|_| Error::MalformedPlace {
        line: idx + 1,
        column,
        value: raw.to_string(),
      })
    };
    entries.push(PlaceEntry {
      city:      field(0).to_string(),
      country:   field(1).to_string(),
      latitude:  num("latitude", field(2))?,
      longitude: num("longitude", field(3))?,
    });
  }

  Ok(entries)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  const DATASET: &str = "city,country,latitude,longitude\n\
                         Rome,Italy,41.9028,12.4964\n\
                         Paris,France,48.8566,2.3522\n\
                         Philadelphia,United States,39.9526,-75.1652";

  fn geocoder() -> OfflineGeocoder {
    OfflineGeocoder::new(parse_places(DATASET).unwrap()).unwrap()
  }

  #[test]
  fn nearest_place_wins() {
    let matches = geocoder().resolve(&[GeoPoint {
      latitude:  41.80,
      longitude: 12.60,
    }]);
    let hit = matches[0].as_ref().unwrap();
    assert_eq!(hit.city, "Rome");
    assert_eq!(hit.country, "Italy");
  }

  #[test]
  fn results_preserve_input_order() {
    let matches = geocoder().resolve(&[
      GeoPoint { latitude: 48.9, longitude: 2.3 },
      GeoPoint { latitude: 40.0, longitude: -75.0 },
    ]);
    assert_eq!(matches[0].as_ref().unwrap().city, "Paris");
    assert_eq!(matches[1].as_ref().unwrap().city, "Philadelphia");
  }

  #[test]
  fn non_finite_coordinates_resolve_to_none() {
    let matches = geocoder().resolve(&[GeoPoint {
      latitude:  f64::NAN,
      longitude: 12.0,
    }]);
    assert!(matches[0].is_none());
  }

  #[test]
  fn empty_dataset_is_rejected() {
    assert!(matches!(
      OfflineGeocoder::new(Vec::new()),
      Err(Error::EmptyDataset)
    ));
  }

  #[test]
  fn malformed_latitude_is_reported_with_line() {
    let input = "city,country,latitude,longitude\nRome,Italy,north,12.5";
    let err = parse_places(input).unwrap_err();
    assert!(matches!(
      err,
      Error::MalformedPlace { line: 2, column: "latitude", .. }
    ));
  }

  #[test]
  fn quoted_city_names_keep_their_commas() {
    let input = "city,country,latitude,longitude\n\
                 \"Washington, D.C.\",United States,38.9072,-77.0369";
    let entries = parse_places(input).unwrap();
    assert_eq!(entries[0].city, "Washington, D.C.");
  }
}
