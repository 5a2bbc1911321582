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

//! # Travel journal TUI.
//!
//! A terminal journal of the places a user has visited.
//!
//! This application coordinates a TUI frontend built with `ratatui` and a
//! background processing layer.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, UI rendering, and
//!   owns the location and search controllers.
//! * **Background Workers** handle place store queries and photo loading, and
//!   the location and geocoding providers run their network requests on
//!   threads of their own.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels. Provider outcomes are delivered as events on the same channel as
//! key presses, so every state change happens on the main thread.

mod commander;
mod components;
mod config;
mod db;
mod events;
mod geocode;
mod location;
mod model;
mod photo;
mod render;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use rusqlite::Connection;
use std::{
    io::{self},
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Duration,
};
use tracing::{error, info};

use crate::{
    commander::Commander,
    components::{LocateView, PlacesView, SearchView},
    config::AppConfig,
    events::{AppEvent, StatusLine, process_events},
    geocode::{SearchQueryController, nominatim::NominatimGeocoder},
    location::{LocationAcquisitionController, geoip::GeoIpLocationProvider},
    model::{Pin, places::Places},
    photo::PhotoHolder,
    tasks::AppTask,
    theme::Theme,
    util::{sink::channel_sink, timer::ThreadScheduler},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MainView {
    Places,
    Search,
    Locate,
}

impl MainView {
    pub(crate) const ALL: [MainView; 3] = [MainView::Places, MainView::Search, MainView::Locate];

    pub(crate) fn title(self) -> &'static str {
        match self {
            MainView::Places => "Places",
            MainView::Search => "Search",
            MainView::Locate => "Locate",
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            MainView::Places => MainView::Search,
            MainView::Search => MainView::Locate,
            MainView::Locate => MainView::Places,
        }
    }

    pub(crate) fn previous(self) -> Self {
        match self {
            MainView::Places => MainView::Locate,
            MainView::Search => MainView::Places,
            MainView::Locate => MainView::Search,
        }
    }
}

/// Application state.
pub(crate) struct App {
    pub(crate) config: AppConfig,

    pub(crate) theme: Theme,
    pub(crate) main_view: MainView,

    pub(crate) event_tx: Sender<AppEvent>,
    pub(crate) event_rx: Receiver<AppEvent>,

    pub(crate) task_tx: Sender<AppTask>,

    pub(crate) places: Places,
    pub(crate) location: LocationAcquisitionController,
    pub(crate) search: SearchQueryController,

    pub(crate) places_view: PlacesView,
    pub(crate) search_view: SearchView,
    pub(crate) locate_view: LocateView,

    pub(crate) commander: Commander,

    pub(crate) pin: Option<Pin>,
    pub(crate) status: Option<StatusLine>,
}

impl App {
    /// Create a new instance of application state around already built
    /// controllers.
    pub(crate) fn new(
        config: AppConfig,
        task_tx: Sender<AppTask>,
        event_tx: Sender<AppEvent>,
        event_rx: Receiver<AppEvent>,
        location: LocationAcquisitionController,
        search: SearchQueryController,
    ) -> Self {
        Self {
            config,
            theme: Theme::default(),
            main_view: MainView::Places,
            event_tx,
            event_rx,
            task_tx,
            places: Places::new(),
            location,
            search,
            places_view: PlacesView::new(),
            search_view: SearchView::new(),
            locate_view: LocateView::new(),
            commander: Commander::new(),
            pin: None,
            status: None,
        }
    }
}

/// Builds the application with its network backed providers.
///
/// Both providers report back through sinks feeding the application event
/// channel.
fn build_app(config: AppConfig, task_tx: Sender<AppTask>) -> Result<App> {
    let (event_tx, event_rx) = mpsc::channel();

    let provider = GeoIpLocationProvider::new(
        &config.location.endpoint,
        &config.geocoder.user_agent,
        config.location.access,
        channel_sink(event_tx.clone(), AppEvent::Location),
    )?;
    let location = LocationAcquisitionController::new(Box::new(provider), config.location.auto_start);

    let geocoder = NominatimGeocoder::new(
        &config.geocoder.base_url,
        &config.geocoder.user_agent,
        config.geocoder.limit,
    )?;
    let search = SearchQueryController::new(
        Arc::new(geocoder),
        Box::new(ThreadScheduler),
        channel_sink(event_tx.clone(), AppEvent::Search),
    )
    .with_debounce(Duration::from_millis(config.search.debounce_ms))
    .with_min_query_len(config.search.min_query_len);

    Ok(App::new(config, task_tx, event_tx, event_rx, location, search))
}

/// The entry point of the application.
///
/// Loads configuration, opens the place store, manages the terminal
/// lifecycle, and returns an error if any part of the execution fails.
fn main() -> Result<()> {
    let config = config::load_config();

    util::logging::init_logging(&config.log_file)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let conn = db::init_db(&config.database_file)
        .with_context(|| format!("Failed to open place store {}", config.database_file))?;

    let (task_tx, task_rx) = mpsc::channel();

    let mut app = build_app(config, task_tx).context("Failed to initialise application")?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, conn, task_rx);
    restore_terminal(&mut terminal);

    if let Err(e) = &res {
        error!("exiting with error: {:#}", e);
    }
    info!("stopped");

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin outline in the terminal's own colour
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&hex).ok();
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is "best-effort" and does not return a result, as it is
/// typically called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg().ok();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker to process asynchronous [`AppTask`]s against the store.
/// * An input thread to poll for system keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// After spawning the workers, it hands control to [`process_events`] to
/// manage the UI and state updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    conn: Connection,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    // Spawn a background worker to process application tasks asynchronously.
    let photos = PhotoHolder::new(app.config.photos.max_bytes);
    tasks::spawn_task_worker(conn, photos, task_rx, app.event_tx.clone());

    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                if key.kind != event::KeyEventKind::Press {
                    continue;
                }
                if tx_keys.send(AppEvent::Key(key)).is_err() {
                    break;
                }
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(Duration::from_millis(250));
        }
    });

    // Initial load of the stored places
    app.task_tx
        .send(AppTask::QueryPlaces(app.places.query.clone()))
        .context("Failed to request the stored places")?;

    terminal.draw(|f| render::draw(f, app))?;

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
