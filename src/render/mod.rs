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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every handled event to provide a reactive user interface.

mod commander;
pub(crate) mod icons;
mod pin;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::{
    App, MainView,
    render::{commander::draw_commander, pin::draw_pin},
};

/// Renders the user interface to the terminal frame.
///
/// The screen is split into a line of view tabs, the active view, a panel
/// showing the pinned coordinate, and the command line.
///
/// # Arguments
///
/// * `f` - The current terminal frame used for drawing.
/// * `app` - A mutable reference to the application state, allowing the UI
///   to update internal view state (like list scroll positions).
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background_colour)),
        area,
    );

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    draw_tabs(f, outer[0], app);

    let show_cursor = !app.commander.active();
    match app.main_view {
        MainView::Places => app.places_view.draw(f, outer[1], &app.places, &app.theme),
        MainView::Search => {
            app.search_view
                .draw(f, outer[1], &app.search, &app.theme, show_cursor)
        }
        MainView::Locate => app.locate_view.draw(f, outer[1], &app.location, &app.theme),
    }

    draw_pin(f, outer[2], app);

    draw_commander(f, outer[3], app);
}

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];
    for (index, view) in MainView::ALL.iter().enumerate() {
        let text = format!(" {} {} ", index + 1, view.title());
        let span = if *view == app.main_view {
            Span::styled(
                text,
                Style::default()
                    .fg(app.theme.background_colour)
                    .bg(app.theme.accent_colour)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::raw(text).fg(app.theme.border_colour)
        };
        spans.push(span);
        spans.push(Span::raw(" "));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
