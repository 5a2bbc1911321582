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

//! UI rendering logic for the locate view.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::{
    components::LocateView,
    location::{AuthorizationState, LocationAcquisitionController},
    render::icons::{ICON_FIX, ICON_SEARCHING},
    theme::Theme,
    util::format::format_fix_time,
};

const HELP: &str = "p allow location | l locate | s stop | u pin this fix";

impl LocateView {
    pub(crate) fn draw(
        &self,
        f: &mut Frame,
        area: Rect,
        location: &LocationAcquisitionController,
        theme: &Theme,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let header_block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(1));
        f.render_widget(Paragraph::new(HELP).block(header_block), chunks[0]);

        let label = |text: &'static str| {
            Span::styled(format!("{:<15}", text), Style::default().add_modifier(Modifier::BOLD))
        };

        let state = location.authorization_state();
        let state_colour = if state.is_authorized() {
            theme.accent_colour
        } else if matches!(state, AuthorizationState::Denied | AuthorizationState::Restricted) {
            theme.error_colour
        } else {
            theme.border_colour
        };

        let mut lines = vec![
            Line::from(vec![
                label("Access"),
                Span::raw(state.label()).fg(state_colour),
            ]),
            Line::from(vec![
                label("Status"),
                if location.is_acquiring() {
                    Span::raw(format!("{} locating...", ICON_SEARCHING)).fg(theme.accent_colour)
                } else {
                    Span::raw("idle")
                },
            ]),
        ];

        lines.push(match location.last_fix() {
            Some(fix) => Line::from(vec![
                label("Last fix"),
                Span::raw(format!("{} {}", ICON_FIX, fix.coordinate)).fg(theme.accent_colour),
                Span::raw(format!(" at {}", format_fix_time(fix.timestamp))),
            ]),
            None => Line::from(vec![label("Last fix"), Span::raw("none yet")]),
        });

        if let Some(error) = location.last_error() {
            lines.push(Line::from(vec![
                label("Problem"),
                Span::raw(error).fg(theme.error_colour),
            ]));
        }

        if state == AuthorizationState::Undetermined {
            lines.push(Line::from(""));
            lines.push(
                Line::from("Press 'p' to allow an approximate location lookup.")
                    .fg(theme.border_colour),
            );
        }

        f.render_widget(
            Paragraph::new(lines)
                .block(Block::default().padding(Padding::new(1, 1, 1, 0)))
                .wrap(Wrap { trim: true }),
            chunks[1],
        );
    }
}
