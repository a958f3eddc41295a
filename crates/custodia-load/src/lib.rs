//! SQLite bulk loader for the exported Custodia tables.
//!
//! Reads the CSV files written by `custodia-feeds::serialize` and inserts
//! them into a SQLite database in foreign-key dependency order.

mod loader;
mod schema;

pub mod error;

pub use error::{Error, Result};
pub use loader::{LOAD_ORDER, SqliteWarehouse};
