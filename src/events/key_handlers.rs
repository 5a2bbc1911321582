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

//! Keyboard routing.
//!
//! Keys go to the command line first, then to the active view, and only then
//! to the global bindings. The search view owns its text box, so while it is
//! active almost every key is text and global bindings other than view
//! switching are unreachable.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent};

use crate::{
    App, MainView,
    components::{LocateAction, SearchAction},
    events::{
        AppEvent,
        handlers::{pin_current_location, pin_search_result},
    },
};

/// Maps keyboard input to application actions.
///
/// # Arguments
///
/// * `app` - A mutable reference to the application state.
/// * `key` - The key event captured from the terminal backend.
///
/// # Errors
///
/// Returns an error if a task or event fails to send.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let event = Event::Key(key);

    // The search box owns every printable key, ':' included.
    let search_box_focused = app.main_view == MainView::Search && !app.commander.active();
    if !search_box_focused && app.commander.handle_event(&event, &app.event_tx) {
        return Ok(());
    }

    let handled = match app.main_view {
        MainView::Places => app.places_view.process_event(&event, &mut app.places),

        MainView::Search if !matches!(key.code, KeyCode::Tab | KeyCode::BackTab) => {
            if let Some(action) = app
                .search_view
                .process_event(&event, app.search.candidates())
            {
                handle_search_action(app, action)?;
            }
            true
        }
        MainView::Search => false,

        MainView::Locate => match app.locate_view.process_event(&event) {
            Some(action) => {
                handle_locate_action(app, action);
                true
            }
            None => false,
        },
    };

    if !handled {
        process_global_key_event(app, key)?;
    }

    Ok(())
}

fn handle_search_action(app: &mut App, action: SearchAction) -> Result<()> {
    match action {
        SearchAction::QueryChanged(text) => app.search.set_query(&text),
        SearchAction::Choose(id) => {
            if app.search.select_candidate(id).is_some() {
                pin_search_result(app);
            }
        }
        SearchAction::Leave => app
            .event_tx
            .send(AppEvent::SetMainView(MainView::Places))?,
    }

    Ok(())
}

fn handle_locate_action(app: &mut App, action: LocateAction) {
    match action {
        LocateAction::RequestPermission => app.location.request_permission(),
        LocateAction::Start => app.location.start(),
        LocateAction::Stop => app.location.stop(),
        LocateAction::PinFix => pin_current_location(app),
    }
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Char('1') => app.event_tx.send(AppEvent::SetMainView(MainView::Places))?,
        KeyCode::Char('2') | KeyCode::Char('/') => {
            app.event_tx.send(AppEvent::SetMainView(MainView::Search))?
        }
        KeyCode::Char('3') => app.event_tx.send(AppEvent::SetMainView(MainView::Locate))?,

        KeyCode::Tab => app
            .event_tx
            .send(AppEvent::SetMainView(app.main_view.next()))?,
        KeyCode::BackTab => app
            .event_tx
            .send(AppEvent::SetMainView(app.main_view.previous()))?,

        _ => {}
    }

    Ok(())
}
