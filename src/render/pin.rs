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

//! Render the pinned coordinate.
//!
//! The pin is what the next `:add` records, so it stays visible whichever
//! view is active.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{App, render::icons::ICON_PIN};

pub(crate) fn draw_pin(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let line = match &app.pin {
        Some(pin) => Line::from(vec![
            Span::styled(format!("{} ", ICON_PIN), Style::default().add_modifier(Modifier::BOLD))
                .fg(app.theme.accent_colour),
            Span::styled(pin.label.as_str(), Style::default().add_modifier(Modifier::BOLD))
                .fg(app.theme.accent_colour),
            Span::raw(format!("  {}", pin.coordinate)),
            Span::raw("  :add <name> | <country> to record").fg(app.theme.border_colour),
        ]),
        None => Line::from("Nothing pinned. Choose a search result or pin a location fix")
            .fg(app.theme.border_colour),
    };

    f.render_widget(Paragraph::new(line).block(block), area);
}
