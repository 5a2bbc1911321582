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

//! Current location view.

mod render;

use crossterm::event::{Event, KeyCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LocateAction {
    RequestPermission,
    Start,
    Stop,
    PinFix,
}

pub(crate) struct LocateView;

impl LocateView {
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn process_event(&self, event: &Event) -> Option<LocateAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        match key_event.code {
            KeyCode::Char('p') => Some(LocateAction::RequestPermission),
            KeyCode::Char('l') | KeyCode::Enter => Some(LocateAction::Start),
            KeyCode::Char('s') | KeyCode::Esc => Some(LocateAction::Stop),
            KeyCode::Char('u') => Some(LocateAction::PinFix),
            _ => None,
        }
    }
}
