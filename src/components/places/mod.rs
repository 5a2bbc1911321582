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

//! The list of visited places.
//!
//! The selection itself lives in [`Places`] so that it survives reloads from
//! the store; this view only keeps the table widget state in step with it.

mod render;

use crossterm::event::{Event, KeyCode};
use ratatui::widgets::TableState;

use crate::model::places::Places;

pub(crate) struct PlacesView {
    table_state: TableState,
}

impl PlacesView {
    pub(crate) fn new() -> Self {
        Self {
            table_state: TableState::new(),
        }
    }

    /// Moves the selection, returning whether the key was used.
    pub(crate) fn process_event(&mut self, event: &Event, places: &mut Places) -> bool {
        let Event::Key(key_event) = event else {
            return false;
        };

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => places.next(),
            KeyCode::Char('k') | KeyCode::Up => places.previous(),
            _ => return false,
        }

        self.table_state.select(places.selected_index());
        true
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use uuid::Uuid;

    use super::*;
    use crate::model::{Coordinate, Place};

    fn place(name: &str) -> Place {
        Place {
            id: Uuid::new_v4(),
            name: name.to_string(),
            country: "Japan".to_string(),
            notes: String::new(),
            visited_on: NaiveDate::from_ymd_opt(2019, 4, 2).unwrap(),
            coordinate: Coordinate::new(35.6762, 139.6503).unwrap(),
            photo: None,
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn navigation_keys_move_the_selection() {
        let mut view = PlacesView::new();
        let mut places = Places::new();
        places.set_places(vec![place("Tokyo"), place("Kyoto")]);

        assert!(view.process_event(&key(KeyCode::Char('j')), &mut places));
        assert_eq!(places.selected().map(|p| p.name.as_str()), Some("Kyoto"));
        assert_eq!(view.table_state.selected(), Some(1));

        assert!(view.process_event(&key(KeyCode::Up), &mut places));
        assert_eq!(places.selected_index(), Some(0));
    }

    #[test]
    fn other_keys_are_left_alone() {
        let mut view = PlacesView::new();
        let mut places = Places::new();

        assert!(!view.process_event(&key(KeyCode::Char('q')), &mut places));
    }
}
