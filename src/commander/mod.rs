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

//! Command-line input logic and state management.
//!
//! This module implements a command-line component: `:` opens it, typed text
//! goes to a text input, and Enter parses the buffer into a [`Command`] that
//! is dispatched to the application as an event. Parse failures are reported
//! the same way, as an error event.

use std::{path::PathBuf, sync::mpsc::Sender};

use chrono::{Local, NaiveDate};
use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    MainView,
    events::AppEvent,
    model::{PlaceDetails, PlaceSort},
    util::format::parse_date,
};

const ADD_USAGE: &str = "Usage: add <name> | <country> [| date [| notes]]";
const EDIT_USAGE: &str = "Usage: edit <name> | <country> [| date [| notes]]";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    Add(PlaceDetails),
    Edit(PlaceDetails),

    Photo(PathBuf),
    NoPhoto,
    Remove,

    Filter(String),
    Sort(PlaceSort),

    Pin(PinSource),

    SetMainView(MainView),
    Quit,
}

/// Where `pin` takes its coordinate from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PinSource {
    Search,
    Here,
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Offers a terminal event to the command line, returning whether it was
    /// consumed.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> bool {
        let Event::Key(key_event) = event else {
            return false;
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return true;
            }
            return false;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.input.reset();
                self.active = false;
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.input.reset();
                self.active = false;

                if !buffer.is_empty() {
                    let today = Local::now().date_naive();
                    let event = match parse_command(&buffer, today) {
                        Ok(command) => AppEvent::Command(command),
                        Err(message) => AppEvent::Error(message),
                    };
                    let _ = event_tx.send(event);
                }
            }

            _ => {
                // Delegate all other key events to the managed input component.
                self.input.handle_event(event);
            }
        }

        true
    }
}

/// Parses one command-line buffer.
///
/// Place details are separated by `|`, everything else by whitespace. Dates
/// are resolved against `today`.
pub(crate) fn parse_command(buffer: &str, today: NaiveDate) -> Result<Command, String> {
    let buffer = buffer.trim();
    let (name, rest) = match buffer.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (buffer, ""),
    };

    match (name, rest) {
        ("q" | "quit", "") => Ok(Command::Quit),

        ("add", details) => parse_details(details, today, ADD_USAGE).map(Command::Add),
        ("edit", details) => parse_details(details, today, EDIT_USAGE).map(Command::Edit),

        ("photo", "") => Err("Usage: photo <path>".to_string()),
        ("photo", path) => Ok(Command::Photo(PathBuf::from(path))),
        ("nophoto", "") => Ok(Command::NoPhoto),
        ("rm", "") => Ok(Command::Remove),

        ("filter", text) => Ok(Command::Filter(text.to_string())),
        ("sort", order) => PlaceSort::parse(order)
            .map(Command::Sort)
            .ok_or_else(|| "Usage: sort date|name|country".to_string()),

        ("pin", "search") => Ok(Command::Pin(PinSource::Search)),
        ("pin", "here") => Ok(Command::Pin(PinSource::Here)),
        ("pin", _) => Err("Usage: pin search|here".to_string()),

        ("1", "") => Ok(Command::SetMainView(MainView::Places)),
        ("2", "") => Ok(Command::SetMainView(MainView::Search)),
        ("3", "") => Ok(Command::SetMainView(MainView::Locate)),

        (other, _) => Err(format!("Unknown command '{}'", other)),
    }
}

fn parse_details(text: &str, today: NaiveDate, usage: &str) -> Result<PlaceDetails, String> {
    let mut fields = text.splitn(4, '|').map(str::trim);

    let name = fields.next().unwrap_or_default();
    let country = fields.next().unwrap_or_default();
    if name.is_empty() || country.is_empty() {
        return Err(usage.to_string());
    }

    let visited_on = match fields.next() {
        None | Some("") => None,
        Some(date) => Some(parse_date(date, today).ok_or_else(|| {
            format!(
                "Unrecognised date '{}', use YYYY-MM-DD, today or yesterday",
                date
            )
        })?),
    };

    Ok(PlaceDetails {
        name: name.to_string(),
        country: country.to_string(),
        visited_on,
        notes: fields.next().unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use assert_matches::assert_matches;
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn add_takes_pipe_separated_details() {
        let command = parse_command(
            "add Eiffel Tower | France | 2023-09-12 | Went up at night | twice",
            today(),
        );

        assert_eq!(
            command,
            Ok(Command::Add(PlaceDetails {
                name: "Eiffel Tower".to_string(),
                country: "France".to_string(),
                visited_on: NaiveDate::from_ymd_opt(2023, 9, 12),
                notes: "Went up at night | twice".to_string(),
            }))
        );
    }

    #[test]
    fn date_and_notes_are_optional() {
        assert_matches!(
            parse_command("edit Rome | Italy", today()),
            Ok(Command::Edit(PlaceDetails { visited_on: None, ref notes, .. })) if notes.is_empty()
        );
        assert_matches!(
            parse_command("add Rome | Italy | yesterday", today()),
            Ok(Command::Add(PlaceDetails { visited_on: Some(date), .. })) if date == NaiveDate::from_ymd_opt(2024, 5, 9).unwrap()
        );
    }

    #[test]
    fn incomplete_details_show_usage() {
        assert_eq!(parse_command("add Rome", today()), Err(ADD_USAGE.to_string()));
        assert_eq!(parse_command("edit | Italy", today()), Err(EDIT_USAGE.to_string()));
        assert_matches!(parse_command("add Rome | Italy | someday", today()), Err(msg) if msg.contains("someday"));
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse_command("q", today()), Ok(Command::Quit));
        assert_eq!(parse_command("rm", today()), Ok(Command::Remove));
        assert_eq!(parse_command("nophoto", today()), Ok(Command::NoPhoto));
        assert_eq!(
            parse_command("photo  /tmp/my photo.jpg", today()),
            Ok(Command::Photo(PathBuf::from("/tmp/my photo.jpg")))
        );
        assert_eq!(parse_command("filter", today()), Ok(Command::Filter(String::new())));
        assert_eq!(parse_command("sort Country", today()), Ok(Command::Sort(PlaceSort::Country)));
        assert_eq!(parse_command("pin here", today()), Ok(Command::Pin(PinSource::Here)));
        assert_eq!(parse_command("3", today()), Ok(Command::SetMainView(MainView::Locate)));
    }

    #[test]
    fn bad_commands_are_explained() {
        assert_matches!(parse_command("sort size", today()), Err(msg) if msg.starts_with("Usage: sort"));
        assert_matches!(parse_command("pin", today()), Err(msg) if msg.starts_with("Usage: pin"));
        assert_eq!(parse_command("fly", today()), Err("Unknown command 'fly'".to_string()));
    }

    #[test]
    fn typed_commands_are_dispatched_on_enter() {
        let (tx, rx) = mpsc::channel();
        let mut commander = Commander::new();

        assert!(!commander.handle_event(&key(KeyCode::Char('r')), &tx));
        assert!(commander.handle_event(&key(KeyCode::Char(':')), &tx));
        assert!(commander.active());
        for c in "rm".chars() {
            assert!(commander.handle_event(&key(KeyCode::Char(c)), &tx));
        }
        assert_eq!(commander.input.value(), "rm");

        assert!(commander.handle_event(&key(KeyCode::Enter), &tx));

        assert!(!commander.active());
        assert_eq!(commander.input.value(), "");
        assert_matches!(rx.try_recv(), Ok(AppEvent::Command(Command::Remove)));
    }

    #[test]
    fn escape_abandons_the_command() {
        let (tx, rx) = mpsc::channel();
        let mut commander = Commander::new();

        commander.handle_event(&key(KeyCode::Char(':')), &tx);
        commander.handle_event(&key(KeyCode::Char('q')), &tx);
        commander.handle_event(&key(KeyCode::Esc), &tx);

        assert!(!commander.active());
        assert!(rx.try_recv().is_err());
    }
}
