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

//! Database row mapping for domain models.
//!
//! This module provides the conversion logic between raw SQLite result rows
//! and high-level domain models, ensuring type-safe extraction of model
//! attributes from database queries.

use rusqlite::{Row, types::Type};

use crate::model::{Coordinate, Place};

impl Place {
    /// Maps an SQLite row to a [`Place`] instance.
    ///
    /// This is a helper function designed to be used with
    /// [`rusqlite::Statement::query_map`]. Columns are expected in the order
    /// of `PLACE_COLUMNS`.
    ///
    /// # Errors
    ///
    /// Returns a [`rusqlite::Error`] if:
    /// * The row does not contain enough columns.
    /// * The data in a column cannot be converted to the required Rust type.
    /// * The stored latitude or longitude is out of range.
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let latitude: f64 = row.get(5)?;
        let longitude: f64 = row.get(6)?;
        let coordinate = Coordinate::new(latitude, longitude)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Real, Box::new(e)))?;

        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            country: row.get(2)?,
            notes: row.get(3)?,
            visited_on: row.get(4)?,
            coordinate,
            photo: row.get(7)?,
        })
    }
}
