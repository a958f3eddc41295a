//! Crime-gravity scoring.

use std::collections::HashMap;

use crate::{Error, Result, record::ParticipantRecord};

/// The three factor-weight tables used to score a custody row, keyed by
/// category label. Loaded from the JSON reference feeds by
/// `custodia-feeds::factors`.
#[derive(Debug, Clone, Default)]
pub struct GravityFactors {
  pub age:    HashMap<String, f64>,
  pub kind:   HashMap<String, f64>,
  pub status: HashMap<String, f64>,
}

impl GravityFactors {
  /// Crime gravity = age weight × type weight × status weight.
  ///
  /// Pure: the same participant always scores the same value. A label absent
  /// from its table is an [`Error::UnknownCategory`], never a default
  /// weight.
  pub fn score(&self, participant: &ParticipantRecord) -> Result<f64> {
    let age = weight(&self.age, "age", &participant.age_group)?;
    let kind = weight(&self.kind, "type", &participant.kind)?;
    let status = weight(&self.status, "status", &participant.status)?;
    Ok(age * kind * status)
  }
}

fn weight(
  table: &HashMap<String, f64>,
  factor: &'static str,
  label: &str,
) -> Result<f64> {
  table
    .get(label)
    .copied()
    .ok_or_else(|| Error::UnknownCategory {
      factor,
      label: label.to_string(),
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn factors() -> GravityFactors {
    GravityFactors {
      age:    HashMap::from([
        ("Adult 18+".to_string(), 3.0),
        ("Teen 12-17".to_string(), 2.0),
      ]),
      kind:   HashMap::from([
        ("Victim".to_string(), 1.0),
        ("Subject-Suspect".to_string(), 1.5),
      ]),
      status: HashMap::from([
        ("Arrested".to_string(), 4.0),
        ("Unharmed".to_string(), 1.0),
      ]),
    }
  }

  fn suspect() -> ParticipantRecord {
    ParticipantRecord {
      age_group: "Adult 18+".to_string(),
      gender:    "Male".to_string(),
      status:    "Arrested".to_string(),
      kind:      "Subject-Suspect".to_string(),
    }
  }

  #[test]
  fn score_is_the_exact_product_of_the_three_weights() {
    let score = factors().score(&suspect()).unwrap();
    assert_eq!(score, 3.0 * 1.5 * 4.0);
  }

  #[test]
  fn score_is_deterministic() {
    let f = factors();
    let p = suspect();
    assert_eq!(f.score(&p).unwrap(), f.score(&p).unwrap());
  }

  #[test]
  fn unknown_age_group_is_an_error() {
    let mut p = suspect();
    p.age_group = "Elder 90+".to_string();
    let err = factors().score(&p).unwrap_err();
    assert!(matches!(
      err,
      Error::UnknownCategory { factor: "age", .. }
    ));
  }

  #[test]
  fn unknown_status_is_an_error_not_a_default() {
    let mut p = suspect();
    p.status = "At Large".to_string();
    assert!(factors().score(&p).is_err());
  }
}
