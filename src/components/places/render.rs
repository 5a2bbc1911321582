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

//! UI rendering logic for the places view.
//!
//! A header summarising the current query, the table of places, and a short
//! detail panel for the selected place.

use std::fmt::Write;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table, Wrap},
};

use crate::{
    components::PlacesView,
    model::{PlaceSort, places::Places},
    render::icons::ICON_PHOTO,
    theme::Theme,
    util::format::{format_date, format_size},
};

impl PlacesView {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, places: &Places, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(4),
            ])
            .split(area);

        let header_block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(1));

        let sort = match places.query.sort {
            PlaceSort::NewestVisit => "newest visit",
            PlaceSort::Name => "name",
            PlaceSort::Country => "country",
        };

        let mut header_text = format!(
            "Places | {} visited | by {}",
            places.places().len(),
            sort
        );
        if !places.query.filter.is_empty() {
            let _ = write!(header_text, " | matching '{}'", places.query.filter);
        }

        f.render_widget(Paragraph::new(header_text).block(header_block), chunks[0]);

        self.table_state.select(places.selected_index());
        self.draw_table(f, chunks[1], places, theme);
        draw_details(f, chunks[2], places, theme);
    }

    fn draw_table(&mut self, f: &mut Frame, area: Rect, places: &Places, theme: &Theme) {
        if places.places().is_empty() {
            let hint = if places.query.filter.is_empty() {
                "No places yet. Find one with '2', then ':add <name> | <country>'"
            } else {
                "No places match the filter. Clear it with ':filter'"
            };
            f.render_widget(
                Paragraph::new(hint)
                    .alignment(Alignment::Center)
                    .fg(theme.border_colour),
                area,
            );
            return;
        }

        let rows = places.places().iter().map(|place| {
            let photo = if place.photo.is_some() { ICON_PHOTO } else { "" };

            Row::new(vec![
                Cell::from(
                    Line::from(format_date(place.visited_on))
                        .style(Style::default().fg(theme.table_date_fg))
                        .alignment(Alignment::Right),
                ),
                Cell::from(""),
                Cell::from(Line::from(place.name.as_str()).style(Style::default().fg(theme.table_name_fg))),
                Cell::from(Line::from(place.country.as_str()).style(Style::default().fg(theme.table_country_fg))),
                Cell::from(
                    Line::from(place.coordinate.to_string())
                        .style(Style::default().fg(theme.table_coordinate_fg)),
                ),
                Cell::from(Line::from(photo).style(Style::default().fg(theme.table_photo_fg))),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(11),
                Constraint::Length(1),
                Constraint::Percentage(35),
                Constraint::Percentage(25),
                Constraint::Length(22),
                Constraint::Length(2),
            ],
        )
        .header(
            Row::new(vec![
                Cell::from(Line::from("Visited").alignment(Alignment::Right)),
                Cell::from(""),
                Cell::from("Name"),
                Cell::from("Country"),
                Cell::from("Coordinate"),
                Cell::from(""),
            ])
            .style(Style::default().bold().fg(theme.accent_colour))
            .bottom_margin(1),
        )
        .row_highlight_style(Style::default().bg(theme.highlight_bg).fg(Color::White))
        .block(Block::default().padding(Padding::horizontal(1)));

        f.render_stateful_widget(table, area, &mut self.table_state);
    }
}

fn draw_details(f: &mut Frame, area: Rect, places: &Places, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::horizontal(1));

    let Some(place) = places.selected() else {
        f.render_widget(block, area);
        return;
    };

    let photo = match &place.photo {
        Some(bytes) => format!("{} photo, {}", ICON_PHOTO, format_size(bytes.len())),
        None => "no photo".to_string(),
    };

    let lines = vec![
        Line::from(format!("{}, {} | {}", place.name, place.country, photo)).fg(theme.accent_colour),
        Line::from(if place.notes.is_empty() { "No notes" } else { place.notes.as_str() }),
    ];

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
