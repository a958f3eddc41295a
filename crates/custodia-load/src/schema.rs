//! SQL schema for the Custodia SQLite warehouse.
//!
//! Executed once when the database is opened. Idempotent thanks to
//! `CREATE TABLE IF NOT EXISTS`.

pub const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS dates (
    date_id   INTEGER PRIMARY KEY,
    date      TEXT,
    day       INTEGER,
    month     INTEGER,
    year      INTEGER,
    quarter   INTEGER,
    week_day  TEXT
);

CREATE TABLE IF NOT EXISTS gun (
    is_stolen TEXT,
    gun_type  TEXT,
    gun_id    INTEGER PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS participant (
    age_group      TEXT,
    gender         TEXT,
    status         TEXT,
    type           TEXT,
    participant_id INTEGER PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS incident (
    incident_id INTEGER PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS geography (
    geography_id INTEGER PRIMARY KEY,
    city         TEXT,
    country      TEXT,
    continent    TEXT,
    latitude     REAL,
    longitude    REAL
);

-- Custody references every dimension; it loads last.
CREATE TABLE IF NOT EXISTS custody (
    custody_id     INTEGER PRIMARY KEY,
    participant_id INTEGER NOT NULL REFERENCES participant(participant_id),
    gun_id         INTEGER NOT NULL REFERENCES gun(gun_id),
    geo_id         INTEGER NOT NULL REFERENCES geography(geography_id),
    date_id        INTEGER NOT NULL REFERENCES dates(date_id),
    crime_gravity  REAL NOT NULL,
    incident_id    INTEGER NOT NULL REFERENCES incident(incident_id)
);
";
