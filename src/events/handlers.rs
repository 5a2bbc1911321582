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

use anyhow::Result;
use chrono::Local;
use tracing::{info, warn};

use crate::{
    App, MainView,
    commander::{Command, PinSource},
    config,
    events::{AppEvent, StatusLine},
    geocode::SearchEvent,
    location::{AuthorizationState, LocationEvent, geoip::LocationAccess},
    model::{Coordinate, Pin, Place, PlaceDraft},
    tasks::AppTask,
};

const CURRENT_LOCATION: &str = "Current location";

pub(super) fn handle_set_main_view(app: &mut App, main_view: MainView) {
    app.main_view = main_view;
}

pub(super) fn handle_location_event(app: &mut App, event: LocationEvent) {
    let before = app.location.authorization_state();
    app.location.handle_event(event);
    let after = app.location.authorization_state();

    if before != after {
        remember_location_access(app, after);
    }
}

pub(super) fn handle_search_event(app: &mut App, event: SearchEvent) {
    app.search.handle_event(event);
}

pub(super) fn handle_set_places(app: &mut App, places: Vec<Place>) {
    app.places.set_places(places);
}

pub(super) fn handle_places_changed(app: &mut App) -> Result<()> {
    app.task_tx
        .send(AppTask::QueryPlaces(app.places.query.clone()))?;

    Ok(())
}

/// Releases the pin once the store has saved a place at it.
pub(super) fn handle_place_created(app: &mut App, coordinate: Coordinate) {
    if app.pin.as_ref().is_some_and(|pin| pin.coordinate == coordinate) {
        app.pin = None;
    }
}

pub(super) fn handle_status(app: &mut App, status: StatusLine) {
    if let StatusLine::Error(message) = &status {
        warn!(%message, "reporting error");
    }
    app.status = Some(status);
}

pub(super) fn handle_command(app: &mut App, command: Command) -> Result<()> {
    match command {
        Command::Add(details) => {
            let Some(pin) = app.pin.clone() else {
                report_error(
                    app,
                    "Nothing pinned. Choose a search result or use ':pin here' first",
                );
                return Ok(());
            };

            let draft = PlaceDraft {
                name: details.name,
                country: details.country,
                notes: details.notes,
                visited_on: details
                    .visited_on
                    .unwrap_or_else(|| Local::now().date_naive()),
                coordinate: pin.coordinate,
                photo: None,
            };
            app.task_tx.send(AppTask::CreatePlace(draft))?;
        }

        Command::Edit(details) => {
            let Some(mut place) = selected_place(app) else {
                return Ok(());
            };
            match place.apply_edit(details) {
                Ok(()) => app.task_tx.send(AppTask::UpdatePlace(place))?,
                Err(e) => report_error(app, &e.to_string()),
            }
        }

        Command::Photo(path) => {
            if let Some(place) = selected_place(app) {
                app.task_tx.send(AppTask::AttachPhoto(place.id, path))?;
            }
        }

        Command::NoPhoto => {
            if let Some(place) = selected_place(app) {
                app.task_tx.send(AppTask::RemovePhoto(place.id))?;
            }
        }

        Command::Remove => {
            if let Some(place) = selected_place(app) {
                app.task_tx.send(AppTask::DeletePlace(place.id))?;
            }
        }

        Command::Filter(text) => {
            app.places.query.filter = text;
            handle_places_changed(app)?;
        }

        Command::Sort(sort) => {
            app.places.query.sort = sort;
            handle_places_changed(app)?;
        }

        Command::Pin(PinSource::Search) => pin_search_result(app),
        Command::Pin(PinSource::Here) => pin_current_location(app),

        Command::SetMainView(view) => handle_set_main_view(app, view),

        Command::Quit => app.event_tx.send(AppEvent::ExitApplication)?,
    }

    Ok(())
}

/// Pins the search candidate the user last chose.
pub(super) fn pin_search_result(app: &mut App) {
    let Some(candidate) = app.search.selected() else {
        report_error(app, "No search result chosen yet");
        return;
    };

    let pin = Pin {
        label: candidate.name.clone(),
        coordinate: candidate.coordinate,
    };
    set_pin(app, pin);
}

/// Pins the most recent location fix.
pub(super) fn pin_current_location(app: &mut App) {
    let Some(fix) = app.location.last_fix() else {
        report_error(app, "No location fix yet. Press 'l' in the Locate view");
        return;
    };

    let pin = Pin {
        label: CURRENT_LOCATION.to_string(),
        coordinate: fix.coordinate,
    };
    set_pin(app, pin);
}

fn set_pin(app: &mut App, pin: Pin) {
    info!(label = %pin.label, coordinate = %pin.coordinate, "pinned");
    app.status = Some(StatusLine::Info(format!(
        "Pinned {} ({}). Use ':add' to record it",
        pin.label, pin.coordinate
    )));
    app.pin = Some(pin);
}

fn selected_place(app: &mut App) -> Option<Place> {
    let place = app.places.selected().cloned();
    if place.is_none() {
        report_error(app, "Select a place first");
    }
    place
}

fn report_error(app: &mut App, message: &str) {
    handle_status(app, StatusLine::Error(message.to_string()));
}

/// Carries a decided authorization over to the next run.
fn remember_location_access(app: &mut App, state: AuthorizationState) {
    let access = match state {
        AuthorizationState::AuthorizedLimited | AuthorizationState::AuthorizedFull => {
            LocationAccess::Approximate
        }
        AuthorizationState::Denied => LocationAccess::Denied,
        AuthorizationState::Undetermined | AuthorizationState::Restricted => return,
    };

    if app.config.location.access == access {
        return;
    }

    app.config.location.access = access;
    if let Err(e) = config::save_config(&app.config) {
        warn!(error = %e, "failed to save location access");
    }
}
