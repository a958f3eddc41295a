//! [`SqliteWarehouse`] — bulk inserts of the exported CSV tables.

use std::{fs, path::Path};

use custodia_feeds::csv::split_fields;
use rusqlite::Connection;
use tracing::info;

use crate::{
  error::{Error, Result},
  schema::SCHEMA,
};

/// Load order: every dimension before the custody fact table.
pub const LOAD_ORDER: [&str; 6] =
  ["dates", "gun", "participant", "incident", "geography", "custody"];

/// A Custodia warehouse backed by a single SQLite file.
pub struct SqliteWarehouse {
  conn: Connection,
}

impl SqliteWarehouse {
  /// Open (or create) a warehouse at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::init(Connection::open(path)?)
  }

  /// Open an in-memory warehouse — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    Self::init(Connection::open_in_memory()?)
  }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn })
  }

  /// Load all six exported files from `dir`, in dependency order.
  /// File names are `<table>.csv`, as written by the exporter.
  pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    for table in LOAD_ORDER {
      let rows = self.load_table(table, &dir.join(format!("{table}.csv")))?;
      info!(table, rows, "table loaded");
    }
    Ok(())
  }

  /// Insert every row of one exported CSV and return the row count.
  ///
  /// The INSERT statement is built from the file's header, so the loader
  /// follows whatever column order the exporter wrote. All rows of a table
  /// go in a single transaction: the table arrives whole or not at all.
  pub fn load_table(&mut self, table: &str, path: &Path) -> Result<usize> {
    let raw = fs::read_to_string(path)?;
    let mut lines = raw
      .lines()
      .enumerate()
      .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines
      .next()
      .ok_or_else(|| Error::EmptyTable(table.to_string()))?;
    let columns = split_fields(header);
    let placeholders = (1..=columns.len())
      .map(|i| format!("?{i}"))
      .collect::<Vec<_>>()
      .join(", ");
    let sql = format!(
      "INSERT INTO {table} ({}) VALUES ({placeholders})",
      columns.join(", ")
    );

    let tx = self.conn.transaction()?;
    let mut count = 0usize;
    {
      let mut stmt = tx.prepare(&sql)?;
      for (idx, line) in lines {
        let fields = split_fields(line);
        if fields.len() != columns.len() {
          return Err(Error::RowShape {
            table:    table.to_string(),
            line:     idx + 1,
            expected: columns.len(),
            got:      fields.len(),
          });
        }
        // Values bind as text; SQLite column affinity converts the numeric
        // columns on insert.
        stmt.execute(rusqlite::params_from_iter(
          fields.iter().map(String::as_str),
        ))?;
        count += 1;
      }
    }
    tx.commit()?;
    Ok(count)
  }

  /// Borrow the underlying connection, e.g. for ad-hoc queries after a load.
  pub fn connection(&self) -> &Connection {
    &self.conn
  }
}
