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

//! Place search view.
//!
//! This module owns the search text box and the highlighted row of the
//! candidate list. Every edit of the text is reported as an action so the
//! search controller sees each change; debouncing is the controller's job.

mod render;

use crossterm::event::{Event, KeyCode};
use ratatui::widgets::ListState;
use tui_input::{Input, backend::crossterm::EventHandler};
use uuid::Uuid;

use crate::geocode::SearchResult;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SearchAction {
    QueryChanged(String),
    Choose(Uuid),
    Leave,
}

pub(crate) struct SearchView {
    pub(crate) input: Input,
    list_state: ListState,
}

impl SearchView {
    pub(crate) fn new() -> Self {
        Self {
            input: Input::default(),
            list_state: ListState::default(),
        }
    }

    pub(crate) fn process_event(
        &mut self,
        event: &Event,
        candidates: &[SearchResult],
    ) -> Option<SearchAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        match key_event.code {
            KeyCode::Esc => Some(SearchAction::Leave),

            KeyCode::Down => {
                self.goto_next(candidates.len());
                None
            }
            KeyCode::Up => {
                self.goto_previous(candidates.len());
                None
            }

            KeyCode::Enter => {
                let index = self.list_state.selected().unwrap_or(0);
                match candidates.get(index) {
                    Some(candidate) => Some(SearchAction::Choose(candidate.id)),
                    None => Some(SearchAction::QueryChanged(self.input.value().to_string())),
                }
            }

            _ => {
                let before = self.input.value().to_string();
                self.input.handle_event(event);
                if self.input.value() == before {
                    return None;
                }

                self.list_state.select(None);
                Some(SearchAction::QueryChanged(self.input.value().to_string()))
            }
        }
    }

    fn goto_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    fn goto_previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }
}
