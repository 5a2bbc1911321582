// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Data access layer.
//!
//! This module is the place store: it handles all interactions with the
//! SQLite database, including schema creation and the create, update, delete
//! and query operations on visited places. It uses cached statements for the
//! fixed queries.
//!
//! # Tables
//!
//! * `places` - One row per visited place, with its coordinate and an
//!   optional photo blob.

mod model;

use std::path::Path;

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use crate::model::{Place, PlaceQuery, PlaceSort};

const PLACE_COLUMNS: &str =
    "id, name, country, notes, visited_on, latitude, longitude, photo";

/// Opens a connection to the SQLite database and configures it.
///
/// This function performs the following setup:
/// * **WAL Mode**: Enables Write-Ahead Logging.
/// * **Performance Tuning**: Sets synchronous mode to `NORMAL`.
/// * **Schema**: Executes [`create_schema`] to ensure the table and indices
///   exist.
///
/// # Errors
///
/// Returns an error if the database file cannot be opened, if the initial
/// PRAGMA configuration fails, or if the schema cannot be created.
pub(crate) fn init_db(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        bail!("Failed to switch to WAL mode. Current mode: {}", journal_mode);
    }

    conn.execute_batch("PRAGMA synchronous = NORMAL;")?;

    conn.set_prepared_statement_cache_capacity(32);

    create_schema(&conn)?;

    Ok(conn)
}

/// Create the database schema.
///
/// Coordinates are range-checked by the table itself as well as by
/// [`crate::model::Coordinate`].
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS places (
            id BLOB PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            country TEXT NOT NULL,
            notes TEXT NOT NULL DEFAULT '',
            visited_on TEXT NOT NULL,
            latitude REAL NOT NULL CHECK (latitude BETWEEN -90.0 AND 90.0),
            longitude REAL NOT NULL CHECK (longitude BETWEEN -180.0 AND 180.0),
            photo BLOB
        );

        CREATE INDEX IF NOT EXISTS idx_places_visited_on ON places (visited_on);

        COMMIT;",
    )
    .context("Failed to create schema")
}

/// Stores a new place.
///
/// # Errors
///
/// Returns an error if a place with the same id already exists or the insert
/// fails.
pub(crate) fn insert_place(conn: &Connection, place: &Place) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO places (id, name, country, notes, visited_on, latitude, longitude, photo)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;

    stmt.execute(params![
        place.id,
        place.name,
        place.country,
        place.notes,
        place.visited_on,
        place.coordinate.latitude(),
        place.coordinate.longitude(),
        place.photo,
    ])
    .with_context(|| format!("Failed to save place {}", place.name))?;

    Ok(())
}

/// Overwrites every field of an existing place.
///
/// # Errors
///
/// Returns an error if no place has the given id.
pub(crate) fn update_place(conn: &Connection, place: &Place) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "UPDATE places
         SET name = ?2, country = ?3, notes = ?4, visited_on = ?5,
             latitude = ?6, longitude = ?7, photo = ?8
         WHERE id = ?1",
    )?;

    let changed = stmt.execute(params![
        place.id,
        place.name,
        place.country,
        place.notes,
        place.visited_on,
        place.coordinate.latitude(),
        place.coordinate.longitude(),
        place.photo,
    ])?;

    if changed == 0 {
        bail!("No place with id {}", place.id);
    }

    Ok(())
}

/// Deletes a place, returning whether it existed.
pub(crate) fn delete_place(conn: &Connection, id: Uuid) -> Result<bool> {
    let mut stmt = conn.prepare_cached("DELETE FROM places WHERE id = ?1")?;
    let changed = stmt.execute([id])?;

    Ok(changed > 0)
}

/// Fetches one place by id.
pub(crate) fn fetch_place(conn: &Connection, id: Uuid) -> Result<Option<Place>> {
    let sql = format!("SELECT {PLACE_COLUMNS} FROM places WHERE id = ?1");

    let mut stmt = conn.prepare_cached(&sql)?;
    let place = stmt.query_row([id], Place::from_row).optional()?;

    Ok(place)
}

/// Fetches places matching the query's filter in the query's order.
///
/// The filter is a case-insensitive substring match on name or country; a
/// blank filter matches everything.
///
/// # Examples
///
/// ```ignore
/// let places = query_places(&conn, &PlaceQuery::default())?;
/// ```
pub(crate) fn query_places(conn: &Connection, query: &PlaceQuery) -> Result<Vec<Place>> {
    let mut sql = format!("SELECT {PLACE_COLUMNS} FROM places");

    let filter = query.filter.trim();
    let mut params = Vec::new();
    if !filter.is_empty() {
        sql.push_str(" WHERE name LIKE ?1 ESCAPE '\\' OR country LIKE ?1 ESCAPE '\\'");
        params.push(format!("%{}%", escape_like(&filter.to_lowercase())));
    }

    sql.push_str(match query.sort {
        PlaceSort::NewestVisit => " ORDER BY visited_on DESC, name COLLATE NOCASE",
        PlaceSort::Name => " ORDER BY name COLLATE NOCASE, visited_on DESC",
        PlaceSort::Country => " ORDER BY country COLLATE NOCASE, name COLLATE NOCASE",
    });

    let mut stmt = conn.prepare_cached(&sql)?;
    let results = stmt
        .query_map(rusqlite::params_from_iter(params), Place::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(results)
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;
    use crate::model::Coordinate;

    fn open() -> (TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = init_db(dir.path().join("places.db")).unwrap();
        (dir, conn)
    }

    fn place(name: &str, country: &str, visited: (i32, u32, u32)) -> Place {
        Place {
            id: Uuid::new_v4(),
            name: name.to_string(),
            country: country.to_string(),
            notes: String::new(),
            visited_on: NaiveDate::from_ymd_opt(visited.0, visited.1, visited.2).unwrap(),
            coordinate: Coordinate::new(35.6762, 139.6503).unwrap(),
            photo: None,
        }
    }

    fn names(places: &[Place]) -> Vec<&str> {
        places.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn insert_and_fetch_keeps_every_field() {
        let (_dir, conn) = open();
        let mut tokyo = place("Tokyo", "Japan", (2024, 4, 2));
        tokyo.notes = "Cherry blossoms".to_string();
        tokyo.photo = Some(vec![0xff, 0xd8, 0xff, 0xe0]);

        insert_place(&conn, &tokyo).unwrap();

        assert_eq!(fetch_place(&conn, tokyo.id).unwrap(), Some(tokyo));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let (_dir, conn) = open();
        let tokyo = place("Tokyo", "Japan", (2024, 4, 2));

        insert_place(&conn, &tokyo).unwrap();

        assert!(insert_place(&conn, &tokyo).is_err());
    }

    #[test]
    fn newest_visit_comes_first_by_default() {
        let (_dir, conn) = open();
        insert_place(&conn, &place("Lima", "Peru", (2019, 1, 5))).unwrap();
        insert_place(&conn, &place("Cusco", "Peru", (2023, 7, 9))).unwrap();
        insert_place(&conn, &place("Quito", "Ecuador", (2021, 3, 1))).unwrap();

        let places = query_places(&conn, &PlaceQuery::default()).unwrap();

        assert_eq!(names(&places), vec!["Cusco", "Quito", "Lima"]);
    }

    #[test]
    fn sorts_by_name_and_country_ignoring_case() {
        let (_dir, conn) = open();
        insert_place(&conn, &place("lima", "Peru", (2019, 1, 5))).unwrap();
        insert_place(&conn, &place("Cusco", "peru", (2023, 7, 9))).unwrap();
        insert_place(&conn, &place("Quito", "Ecuador", (2021, 3, 1))).unwrap();

        let by_name = PlaceQuery { sort: PlaceSort::Name, filter: String::new() };
        assert_eq!(
            names(&query_places(&conn, &by_name).unwrap()),
            vec!["Cusco", "lima", "Quito"]
        );

        let by_country = PlaceQuery { sort: PlaceSort::Country, filter: String::new() };
        assert_eq!(
            names(&query_places(&conn, &by_country).unwrap()),
            vec!["Quito", "Cusco", "lima"]
        );
    }

    #[test]
    fn filter_matches_name_or_country_case_insensitively() {
        let (_dir, conn) = open();
        insert_place(&conn, &place("Porto", "Portugal", (2022, 6, 1))).unwrap();
        insert_place(&conn, &place("Seville", "Spain", (2022, 6, 8))).unwrap();
        insert_place(&conn, &place("Lisbon", "Portugal", (2022, 5, 28))).unwrap();

        let query = PlaceQuery { sort: PlaceSort::Name, filter: "  PORTU ".to_string() };
        assert_eq!(
            names(&query_places(&conn, &query).unwrap()),
            vec!["Lisbon", "Porto"]
        );

        let query = PlaceQuery { sort: PlaceSort::Name, filter: "sev".to_string() };
        assert_eq!(names(&query_places(&conn, &query).unwrap()), vec!["Seville"]);
    }

    #[test]
    fn filter_wildcards_are_literal() {
        let (_dir, conn) = open();
        insert_place(&conn, &place("Porto", "Portugal", (2022, 6, 1))).unwrap();
        insert_place(&conn, &place("100% Beach", "Mexico", (2020, 2, 2))).unwrap();

        let query = PlaceQuery { sort: PlaceSort::Name, filter: "%".to_string() };
        assert_eq!(names(&query_places(&conn, &query).unwrap()), vec!["100% Beach"]);

        let query = PlaceQuery { sort: PlaceSort::Name, filter: "_".to_string() };
        assert!(query_places(&conn, &query).unwrap().is_empty());
    }

    #[test]
    fn update_overwrites_fields() {
        let (_dir, conn) = open();
        let mut porto = place("Porto", "Portugal", (2022, 6, 1));
        insert_place(&conn, &porto).unwrap();

        porto.notes = "Port wine cellars".to_string();
        porto.photo = Some(vec![1, 2, 3]);
        update_place(&conn, &porto).unwrap();

        assert_eq!(fetch_place(&conn, porto.id).unwrap(), Some(porto));
    }

    #[test]
    fn update_of_a_missing_place_fails() {
        let (_dir, conn) = open();

        assert!(update_place(&conn, &place("Nowhere", "None", (2000, 1, 1))).is_err());
    }

    #[test]
    fn delete_reports_whether_anything_was_removed() {
        let (_dir, conn) = open();
        let porto = place("Porto", "Portugal", (2022, 6, 1));
        insert_place(&conn, &porto).unwrap();

        assert!(delete_place(&conn, porto.id).unwrap());
        assert!(!delete_place(&conn, porto.id).unwrap());
        assert_eq!(fetch_place(&conn, porto.id).unwrap(), None);
    }

    #[test]
    fn out_of_range_rows_fail_to_load() {
        let (_dir, conn) = open();
        conn.execute_batch(
            "DROP TABLE places;
             CREATE TABLE places (
                 id BLOB PRIMARY KEY, name TEXT, country TEXT, notes TEXT,
                 visited_on TEXT, latitude REAL, longitude REAL, photo BLOB
             );",
        )
        .unwrap();
        conn.execute(
            "INSERT INTO places VALUES (?1, 'Bad', 'Data', '', '2020-01-01', 91.0, 0.0, NULL)",
            [Uuid::new_v4()],
        )
        .unwrap();

        assert!(query_places(&conn, &PlaceQuery::default()).is_err());
    }
}
