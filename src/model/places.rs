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

//! Visited places list management.
//!
//! This module provides state for the places view: the most recent query
//! result from the place store, the query that produced it, and the current
//! selection.

use uuid::Uuid;

use crate::model::{Place, PlaceQuery};

pub(crate) struct Places {
    places: Vec<Place>,
    selected: Option<usize>,
    pub(crate) query: PlaceQuery,
}

impl Places {
    pub(crate) fn new() -> Self {
        Self {
            places: vec![],
            selected: None,
            query: PlaceQuery::default(),
        }
    }

    /// Replaces the list wholesale, keeping the selection on the same place
    /// where it still exists.
    pub(crate) fn set_places(&mut self, places: Vec<Place>) {
        let selected_id = self.selected().map(|p| p.id);
        self.places = places;

        self.selected = match selected_id {
            Some(id) => self.position(id).or(self.first_index()),
            None => self.first_index(),
        };
    }

    pub(crate) fn places(&self) -> &[Place] {
        &self.places
    }

    pub(crate) fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub(crate) fn selected(&self) -> Option<&Place> {
        self.selected.and_then(|i| self.places.get(i))
    }

    pub(crate) fn next(&mut self) {
        let len = self.places.len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        });
    }

    pub(crate) fn previous(&mut self) {
        let len = self.places.len();
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.places.iter().position(|p| p.id == id)
    }

    fn first_index(&self) -> Option<usize> {
        if self.places.is_empty() { None } else { Some(0) }
    }
}
