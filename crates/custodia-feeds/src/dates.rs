//! Date-reference feed reader.
//!
//! The feed is XML, one `<row>` per date with the raw date string and its
//! natural key:
//!
//! ```xml
//! <root>
//!   <row><date>2023-03-15 00:00:00</date><date_pk>7</date_pk></row>
//! </root>
//! ```

use std::{fs, path::Path};

use custodia_core::enrich::DateFeedEntry;
use quick_xml::{Reader, events::Event};

use crate::error::{Error, Result};

/// Read and parse the date feed from a file on disk.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<DateFeedEntry>> {
  parse(&fs::read_to_string(path)?)
}

/// Parse the date feed. Each `<row>` must carry both a `<date>` and a
/// `<date_pk>`; `date_pk` must be an integer.
pub fn parse(xml: &str) -> Result<Vec<DateFeedEntry>> {
  let mut reader = Reader::from_str(xml);
  reader.config_mut().trim_text(true);

  let mut entries: Vec<DateFeedEntry> = Vec::new();
  let mut row: Option<RowAccum> = None;
  let mut target: Option<Field> = None;

  loop {
    match reader.read_event() {
      Ok(Event::Start(ref e)) => match e.name().as_ref() {
        b"row" => row = Some(RowAccum::default()),
        b"date" if row.is_some() => target = Some(Field::Date),
        b"date_pk" if row.is_some() => target = Some(Field::DatePk),
        _ => {}
      },
      Ok(Event::Text(ref t)) => {
        if let (Some(accum), Some(field)) = (row.as_mut(), target.as_ref()) {
          let text =
            t.unescape().map_err(|e| Error::Xml(e.to_string()))?.into_owned();
          match field {
            Field::Date => accum.date = Some(text),
            Field::DatePk => accum.date_pk = Some(text),
          }
        }
      }
      Ok(Event::End(ref e)) => match e.name().as_ref() {
        b"date" | b"date_pk" => target = None,
        b"row" => {
          let accum = row
            .take()
            .ok_or_else(|| Error::Xml("unbalanced <row>".to_string()))?;
          entries.push(accum.into_entry(entries.len() + 1)?);
        }
        _ => {}
      },
      Ok(Event::Eof) => break,
      Err(e) => return Err(Error::Xml(e.to_string())),
      _ => {}
    }
  }

  Ok(entries)
}

enum Field {
  Date,
  DatePk,
}

#[derive(Default)]
struct RowAccum {
  date:    Option<String>,
  date_pk: Option<String>,
}

impl RowAccum {
  fn into_entry(self, row_no: usize) -> Result<DateFeedEntry> {
    let date = self
      .date
      .ok_or_else(|| Error::Xml(format!("row {row_no}: missing <date>")))?;
    let raw_pk = self
      .date_pk
      .ok_or_else(|| Error::Xml(format!("row {row_no}: missing <date_pk>")))?;
    let date_id = raw_pk.trim().parse().map_err(|_| Error::MalformedRow {
      line:   row_no,
      column: "date_pk",
      value:  raw_pk.clone(),
    })?;
    Ok(DateFeedEntry { date_id, date })
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn two_rows_parse_in_document_order() {
    let xml = "<root>\
                 <row><date>2023-03-15 00:00:00</date><date_pk>7</date_pk></row>\
                 <row><date>2014/11/30</date><date_pk>812</date_pk></row>\
               </root>";
    let entries = parse(xml).unwrap();
    assert_eq!(entries, vec![
      DateFeedEntry {
        date_id: 7,
        date:    "2023-03-15 00:00:00".to_string(),
      },
      DateFeedEntry {
        date_id: 812,
        date:    "2014/11/30".to_string(),
      },
    ]);
  }

  #[test]
  fn element_order_inside_a_row_does_not_matter() {
    let xml = "<root><row><date_pk>3</date_pk><date>2020-01-02</date></row></root>";
    let entries = parse(xml).unwrap();
    assert_eq!(entries[0].date_id, 3);
    assert_eq!(entries[0].date, "2020-01-02");
  }

  #[test]
  fn missing_date_pk_is_an_error() {
    let xml = "<root><row><date>2020-01-02</date></row></root>";
    assert!(matches!(parse(xml), Err(Error::Xml(_))));
  }

  #[test]
  fn non_numeric_date_pk_is_an_error() {
    let xml = "<root><row><date>2020-01-02</date><date_pk>seven</date_pk></row></root>";
    let err = parse(xml).unwrap_err();
    assert!(
      matches!(err, Error::MalformedRow { column: "date_pk", ref value, .. } if value == "seven")
    );
  }

  #[test]
  fn empty_document_yields_no_entries() {
    assert!(parse("<root></root>").unwrap().is_empty());
  }
}
