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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application, a visited
//! [`Place`] and the geographic [`Coordinate`] it is pinned to, together with
//! the draft and query types used when talking to the place store.

pub(crate) mod places;

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq)]
pub(crate) enum CoordinateError {
    #[error("latitude {0} is outside the range -90 to 90")]
    Latitude(f64),

    #[error("longitude {0} is outside the range -180 to 180")]
    Longitude(f64),
}

/// A point on the globe in decimal degrees.
///
/// Only constructible through [`Coordinate::new`], so every value in the
/// application is known to be in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub(crate) fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }

        Ok(Self { latitude, longitude })
    }

    pub(crate) fn latitude(&self) -> f64 {
        self.latitude
    }

    pub(crate) fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// A place the user has visited, as held by the place store.
#[derive(Clone, PartialEq)]
pub(crate) struct Place {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) country: String,
    pub(crate) notes: String,
    pub(crate) visited_on: NaiveDate,
    pub(crate) coordinate: Coordinate,
    pub(crate) photo: Option<Vec<u8>>,
}

impl fmt::Debug for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Place")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("country", &self.country)
            .field("notes", &self.notes)
            .field("visited_on", &self.visited_on)
            .field("coordinate", &self.coordinate)
            .field("photo", &PhotoSize(&self.photo))
            .finish()
    }
}

/// Prints a photo attachment as its size, keeping image bytes out of logs.
struct PhotoSize<'a>(&'a Option<Vec<u8>>);

impl fmt::Debug for PhotoSize<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(bytes) => write!(f, "Some(<{} bytes>)", bytes.len()),
            None => f.write_str("None"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub(crate) enum DraftError {
    #[error("a place needs a name")]
    MissingName,

    #[error("a place needs a country or region")]
    MissingCountry,
}

/// An unsaved place, as assembled by the add flow.
#[derive(Clone, PartialEq)]
pub(crate) struct PlaceDraft {
    pub(crate) name: String,
    pub(crate) country: String,
    pub(crate) notes: String,
    pub(crate) visited_on: NaiveDate,
    pub(crate) coordinate: Coordinate,
    pub(crate) photo: Option<Vec<u8>>,
}

impl fmt::Debug for PlaceDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceDraft")
            .field("name", &self.name)
            .field("country", &self.country)
            .field("notes", &self.notes)
            .field("visited_on", &self.visited_on)
            .field("coordinate", &self.coordinate)
            .field("photo", &PhotoSize(&self.photo))
            .finish()
    }
}

impl PlaceDraft {
    /// Turns the draft into a storable place with a fresh identity.
    ///
    /// Name and country are trimmed and must not be empty. Notes are kept as
    /// entered.
    pub(crate) fn into_place(self) -> Result<Place, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingName);
        }

        let country = self.country.trim();
        if country.is_empty() {
            return Err(DraftError::MissingCountry);
        }

        Ok(Place {
            id: Uuid::new_v4(),
            name: name.to_string(),
            country: country.to_string(),
            notes: self.notes,
            visited_on: self.visited_on,
            coordinate: self.coordinate,
            photo: self.photo,
        })
    }
}

impl Place {
    /// Applies edited details, keeping identity, coordinate and photo.
    pub(crate) fn apply_edit(&mut self, details: PlaceDetails) -> Result<(), DraftError> {
        let name = details.name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingName);
        }

        let country = details.country.trim();
        if country.is_empty() {
            return Err(DraftError::MissingCountry);
        }

        self.name = name.to_string();
        self.country = country.to_string();
        self.notes = details.notes;
        if let Some(date) = details.visited_on {
            self.visited_on = date;
        }

        Ok(())
    }
}

/// The user-editable text fields of a place.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PlaceDetails {
    pub(crate) name: String,
    pub(crate) country: String,
    pub(crate) visited_on: Option<NaiveDate>,
    pub(crate) notes: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum PlaceSort {
    #[default]
    NewestVisit,
    Name,
    Country,
}

impl PlaceSort {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "date" | "visited" => Some(Self::NewestVisit),
            "name" => Some(Self::Name),
            "country" => Some(Self::Country),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PlaceQuery {
    pub(crate) sort: PlaceSort,
    pub(crate) filter: String,
}

/// The coordinate the next new place will be recorded at.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Pin {
    pub(crate) label: String,
    pub(crate) coordinate: Coordinate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> Coordinate {
        Coordinate::new(48.8566, 2.3522).unwrap()
    }

    fn draft(name: &str, country: &str) -> PlaceDraft {
        PlaceDraft {
            name: name.to_string(),
            country: country.to_string(),
            notes: "  croissants ".to_string(),
            visited_on: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            coordinate: paris(),
            photo: None,
        }
    }

    #[test]
    fn debug_output_shows_photo_size_not_bytes() {
        let mut place = draft("Louvre", "France").into_place().unwrap();
        place.photo = Some(vec![0xff; 2048]);

        let text = format!("{:?}", place);
        assert!(text.contains("photo: Some(<2048 bytes>)"), "{text}");
        assert!(!text.contains("255"));

        let mut unsaved = draft("Louvre", "France");
        unsaved.photo = Some(vec![7; 3]);
        assert!(format!("{:?}", unsaved).contains("Some(<3 bytes>)"));
    }

    #[test]
    fn coordinate_accepts_the_boundaries() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn coordinate_rejects_out_of_range_values() {
        assert_eq!(
            Coordinate::new(90.5, 0.0),
            Err(CoordinateError::Latitude(90.5))
        );
        assert_eq!(
            Coordinate::new(0.0, -180.1),
            Err(CoordinateError::Longitude(-180.1))
        );
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn coordinate_displays_five_decimals() {
        assert_eq!(paris().to_string(), "48.85660, 2.35220");
    }

    #[test]
    fn draft_trims_name_and_country_but_not_notes() {
        let place = draft("  Paris ", " France").into_place().unwrap();

        assert_eq!(place.name, "Paris");
        assert_eq!(place.country, "France");
        assert_eq!(place.notes, "  croissants ");
    }

    #[test]
    fn draft_requires_name_and_country() {
        assert_eq!(draft("  ", "France").into_place(), Err(DraftError::MissingName));
        assert_eq!(draft("Paris", "").into_place(), Err(DraftError::MissingCountry));
    }

    #[test]
    fn edit_keeps_identity_and_date_when_none_given() {
        let mut place = draft("Paris", "France").into_place().unwrap();
        let id = place.id;

        place
            .apply_edit(PlaceDetails {
                name: "Lyon".to_string(),
                country: "France".to_string(),
                visited_on: None,
                notes: String::new(),
            })
            .unwrap();

        assert_eq!(place.id, id);
        assert_eq!(place.name, "Lyon");
        assert_eq!(place.visited_on, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn sort_parses_known_keys() {
        assert_eq!(PlaceSort::parse("Date"), Some(PlaceSort::NewestVisit));
        assert_eq!(PlaceSort::parse("country"), Some(PlaceSort::Country));
        assert_eq!(PlaceSort::parse("rating"), None);
    }
}
