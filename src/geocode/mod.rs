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

//! Place search.
//!
//! [`SearchQueryController`] turns the text of a search box into a list of
//! geocoded candidates. Every edit restarts a debounce timer; only text that
//! stays unchanged for the debounce interval is sent to the
//! [`GeocodingProvider`]. Each request is tagged with a generation number and
//! completions for anything but the current generation are dropped, so late
//! answers to superseded text never reach the candidate list.

pub(crate) mod nominatim;

use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    model::Coordinate,
    util::{
        sink::EventSink,
        timer::{Scheduler, TimerHandle},
    },
};

pub(crate) const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub(crate) const DEFAULT_MIN_QUERY_LEN: usize = 2;

pub(crate) const NO_RESULTS_MESSAGE: &str =
    "No results. Try adding more detail (e.g., 'Paris, France').";

#[derive(Debug, Clone, Error, PartialEq)]
pub(crate) enum GeocodeError {
    #[error("search request failed: {0}")]
    Request(String),

    #[error("search service returned status {0}")]
    Status(u16),

    #[error("unexpected search response: {0}")]
    InvalidResponse(String),
}

/// One match as reported by a geocoding provider.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GeocodedPlace {
    pub(crate) name: Option<String>,
    pub(crate) coordinate: Coordinate,
}

/// A candidate shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchResult {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) coordinate: Coordinate,
}

pub(crate) type GeocodeResult = Result<Vec<GeocodedPlace>, GeocodeError>;

pub(crate) type GeocodeCompletion = Box<dyn FnOnce(GeocodeResult) + Send + 'static>;

/// A forward geocoding capability.
pub(crate) trait GeocodingProvider {
    /// Starts a search for `text` and returns immediately. `complete` is
    /// called exactly once, from any thread, with the matches in relevance
    /// order or a failure.
    fn search(&self, text: &str, complete: GeocodeCompletion);
}

/// Asynchronous outcomes fed back into the controller.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SearchEvent {
    DebounceElapsed {
        generation: u64,
        query: String,
    },
    Completed {
        generation: u64,
        query: String,
        result: GeocodeResult,
    },
}

pub(crate) struct SearchQueryController {
    provider: Arc<dyn GeocodingProvider>,
    scheduler: Box<dyn Scheduler>,
    sink: EventSink<SearchEvent>,
    debounce: Duration,
    min_query_len: usize,

    query_text: String,
    candidates: Vec<SearchResult>,
    is_searching: bool,
    error_message: Option<String>,
    selected: Option<SearchResult>,

    generation: u64,
    debounce_timer: Option<TimerHandle>,
}

impl SearchQueryController {
    pub(crate) fn new(
        provider: Arc<dyn GeocodingProvider>,
        scheduler: Box<dyn Scheduler>,
        sink: EventSink<SearchEvent>,
    ) -> Self {
        Self {
            provider,
            scheduler,
            sink,
            debounce: DEFAULT_DEBOUNCE,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            query_text: String::new(),
            candidates: vec![],
            is_searching: false,
            error_message: None,
            selected: None,
            generation: 0,
            debounce_timer: None,
        }
    }

    pub(crate) fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub(crate) fn with_min_query_len(mut self, min_query_len: usize) -> Self {
        self.min_query_len = min_query_len.max(1);
        self
    }

    pub(crate) fn query_text(&self) -> &str {
        &self.query_text
    }

    pub(crate) fn candidates(&self) -> &[SearchResult] {
        &self.candidates
    }

    pub(crate) fn is_searching(&self) -> bool {
        self.is_searching
    }

    pub(crate) fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub(crate) fn selected(&self) -> Option<&SearchResult> {
        self.selected.as_ref()
    }

    /// Records new search text.
    ///
    /// Whatever was pending for the previous text is abandoned. Text that is
    /// too short clears the results; anything else is searched once the
    /// debounce interval passes without another change. Setting the same
    /// text again searches again.
    pub(crate) fn set_query(&mut self, text: &str) {
        self.query_text = text.to_string();

        if let Some(timer) = self.debounce_timer.take() {
            timer.cancel();
        }
        self.generation += 1;

        let trimmed = text.trim();
        if trimmed.chars().count() < self.min_query_len {
            self.candidates.clear();
            self.error_message = None;
            self.is_searching = false;
            return;
        }

        let generation = self.generation;
        let query = trimmed.to_string();
        let sink = Arc::clone(&self.sink);

        self.debounce_timer = Some(self.scheduler.schedule(
            self.debounce,
            Box::new(move || sink(SearchEvent::DebounceElapsed { generation, query })),
        ));
    }

    /// Marks a candidate as chosen and hands it back to the caller.
    pub(crate) fn select_candidate(&mut self, id: Uuid) -> Option<SearchResult> {
        let candidate = self.candidates.iter().find(|c| c.id == id).cloned()?;
        debug!(name = %candidate.name, "search candidate selected");
        self.selected = Some(candidate.clone());
        Some(candidate)
    }

    /// Applies an asynchronous outcome, discarding anything stale.
    pub(crate) fn handle_event(&mut self, event: SearchEvent) {
        match event {
            SearchEvent::DebounceElapsed { generation, query } => {
                if generation != self.generation {
                    return;
                }
                self.debounce_timer = None;
                self.issue_request(generation, query);
            }
            SearchEvent::Completed {
                generation,
                query,
                result,
            } => {
                if generation != self.generation {
                    debug!(%query, "discarding stale search completion");
                    return;
                }
                self.apply_completion(&query, result);
            }
        }
    }

    fn issue_request(&mut self, generation: u64, query: String) {
        debug!(%query, generation, "issuing place search");

        self.is_searching = true;
        self.error_message = None;
        self.candidates.clear();

        let sink = Arc::clone(&self.sink);
        let text = query.clone();
        self.provider.search(
            &text,
            Box::new(move |result| {
                sink(SearchEvent::Completed {
                    generation,
                    query,
                    result,
                })
            }),
        );
    }

    fn apply_completion(&mut self, query: &str, result: GeocodeResult) {
        self.is_searching = false;

        match result {
            Ok(places) => {
                self.candidates = places
                    .into_iter()
                    .map(|place| SearchResult {
                        id: Uuid::new_v4(),
                        name: place.name.unwrap_or_else(|| query.to_string()),
                        coordinate: place.coordinate,
                    })
                    .collect();

                debug!(%query, result_count = self.candidates.len(), "place search completed");
                if self.candidates.is_empty() {
                    self.error_message = Some(NO_RESULTS_MESSAGE.to_string());
                }
            }
            Err(error) => {
                warn!(%query, %error, "place search failed");
                self.candidates.clear();
                self.error_message = Some(error.to_string());
            }
        }
    }
}
