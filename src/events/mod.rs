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

//! Application logic and event handling.
//!
//! Everything that changes application state arrives here as an [`AppEvent`]
//! on a single channel: key presses, ticks, typed commands, provider outcomes
//! from the location and search controllers, and results from the task
//! worker. Handling them one at a time on the main thread means the
//! controllers never see concurrent mutation.

mod handlers;
mod key_handlers;

use handlers::*;
use key_handlers::process_key_event;

use std::io::Stdout;

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App, MainView,
    commander::Command,
    geocode::SearchEvent,
    location::LocationEvent,
    model::{Coordinate, Place},
    render::draw,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    SetMainView(MainView),

    Command(Command),

    Location(LocationEvent),
    Search(SearchEvent),

    SetPlaces(Vec<Place>),
    PlacesChanged,
    PlaceCreated(Coordinate),

    Status(String),
    Error(String),

    Tick,

    ExitApplication,
}

/// The message shown in the bottom line while the command line is idle.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StatusLine {
    Info(String),
    Error(String),
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        handle_event(app, event)?;

        terminal.draw(|f| draw(f, app))?;
    }
    Ok(())
}

fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::SetMainView(view) => handle_set_main_view(app, view),
        AppEvent::Command(command) => handle_command(app, command)?,
        AppEvent::Location(location_event) => handle_location_event(app, location_event),
        AppEvent::Search(search_event) => handle_search_event(app, search_event),
        AppEvent::SetPlaces(places) => handle_set_places(app, places),
        AppEvent::PlacesChanged => handle_places_changed(app)?,
        AppEvent::PlaceCreated(coordinate) => handle_place_created(app, coordinate),
        AppEvent::Status(message) => handle_status(app, StatusLine::Info(message)),
        AppEvent::Error(message) => handle_status(app, StatusLine::Error(message)),
        AppEvent::Tick | AppEvent::ExitApplication => {}
    }

    Ok(())
}
