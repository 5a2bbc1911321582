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

//! UI rendering logic for the search view.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
};

use crate::{
    components::SearchView, geocode::SearchQueryController, render::icons::ICON_SEARCHING,
    theme::Theme,
};

impl SearchView {
    /// Draws the view. `show_cursor` is false while the command line has
    /// the focus.
    pub(crate) fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        search: &SearchQueryController,
        theme: &Theme,
        show_cursor: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent_colour))
            .title(" Find a place ");
        let input_area = input_block.inner(chunks[0]);

        let width = input_area.width.max(1) as usize;
        let scroll = self.input.visual_scroll(width.saturating_sub(1));
        f.render_widget(
            Paragraph::new(self.input.value())
                .scroll((0, scroll as u16))
                .block(input_block),
            chunks[0],
        );

        if show_cursor {
            let cursor = self.input.visual_cursor().saturating_sub(scroll);
            f.set_cursor_position((input_area.x + cursor as u16, input_area.y));
        }

        let status = if search.is_searching() {
            Line::from(format!(" {} Searching...", ICON_SEARCHING)).fg(theme.accent_colour)
        } else if let Some(message) = search.error_message() {
            Line::from(format!(" {}", message)).fg(theme.error_colour)
        } else if !search.candidates().is_empty() {
            Line::from(format!(
                " {} results for \"{}\", Enter to pin",
                search.candidates().len(),
                search.query_text().trim()
            ))
            .fg(theme.border_colour)
        } else {
            Line::from("")
        };
        f.render_widget(Paragraph::new(status), chunks[1]);

        let candidates = search.candidates();
        if self
            .list_state
            .selected()
            .is_some_and(|i| i >= candidates.len())
        {
            self.list_state.select(None);
        }

        let chosen = search.selected().map(|c| c.id);
        let items: Vec<ListItem> = candidates
            .iter()
            .map(|candidate| {
                let marker = if Some(candidate.id) == chosen { "* " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::raw(marker).fg(theme.accent_colour),
                    Span::raw(candidate.name.as_str()).fg(theme.table_name_fg),
                    Span::raw("  "),
                    Span::raw(candidate.coordinate.to_string()).fg(theme.table_coordinate_fg),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().padding(Padding::horizontal(1)))
            .highlight_style(Style::default().bg(theme.highlight_bg).fg(Color::White));

        f.render_stateful_widget(list, chunks[2], &mut self.list_state);
    }
}
