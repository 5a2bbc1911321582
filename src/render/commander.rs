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

//! Render the command-line interface.
//!
//! While a command is being typed this shows the text and the cursor,
//! otherwise the most recent status or error message.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::{App, MainView, events::StatusLine};

pub(crate) fn draw_commander(f: &mut Frame, area: Rect, app: &App) {
    let commander = &app.commander;

    let container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1)])
        .horizontal_margin(1)
        .split(area);

    let style = Style::default().bg(app.theme.status_bar_colour);

    if commander.active() {
        f.render_widget(
            Paragraph::new(format!(":{}", commander.input.value()))
                .style(style.fg(app.theme.commander_colour)),
            container[0],
        );

        let cursor_x = container[0].x + 1 + commander.input.visual_cursor() as u16;
        let cursor_y = container[0].y;
        f.set_cursor_position((cursor_x, cursor_y));
        return;
    }

    let paragraph = match &app.status {
        Some(StatusLine::Info(message)) => {
            Paragraph::new(message.as_str()).style(style.fg(app.theme.commander_colour))
        }
        Some(StatusLine::Error(message)) => {
            Paragraph::new(message.as_str()).style(style.fg(app.theme.error_colour))
        }
        None if app.main_view == MainView::Search => {
            Paragraph::new("Esc leaves the search box, then : for commands")
                .style(style.fg(app.theme.border_colour))
        }
        None => Paragraph::new("Type : for commands, q to quit")
            .style(style.fg(app.theme.border_colour)),
    };
    f.render_widget(paragraph, container[0]);
}
