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

//! Location acquisition.
//!
//! [`LocationAcquisitionController`] sits between a permission-gated
//! [`LocationProvider`] and a consumer that wants a single fresh fix. The
//! provider reports its outcomes asynchronously as [`LocationEvent`]s, which
//! the main loop feeds back through
//! [`LocationAcquisitionController::handle_event`].
//!
//! Only one acquisition is ever outstanding. Once a reading arrives the
//! provider is stopped again: one good fix is all the application needs.

pub(crate) mod geoip;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthorizationState {
    Undetermined,
    Denied,
    Restricted,
    AuthorizedLimited,
    // Only providers that deliver precise fixes report this. GeoIP never does.
    #[cfg_attr(not(test), allow(dead_code))]
    AuthorizedFull,
}

impl AuthorizationState {
    pub(crate) fn is_authorized(self) -> bool {
        matches!(self, Self::AuthorizedLimited | Self::AuthorizedFull)
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Undetermined => "not yet decided",
            Self::Denied => "denied",
            Self::Restricted => "restricted",
            Self::AuthorizedLimited => "approximate",
            Self::AuthorizedFull => "precise",
        }
    }
}

/// A single successful location reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Fix {
    pub(crate) coordinate: Coordinate,
    pub(crate) timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub(crate) enum LocationError {
    #[error("location access was denied")]
    PermissionDenied,

    #[error("location access is restricted")]
    PermissionRestricted,

    #[error("location unavailable: {0}")]
    Unavailable(String),

    #[error("location lookup failed: {0}")]
    Network(String),

    #[error("unexpected location response: {0}")]
    InvalidResponse(String),
}

/// Outcomes a provider reports back to its controller.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LocationEvent {
    AuthorizationChanged(AuthorizationState),
    Readings(Vec<Fix>),
    Failed(LocationError),
}

/// A platform location capability.
///
/// All operations return immediately. Their outcomes arrive later as
/// [`LocationEvent`]s through the sink the provider was built with.
pub(crate) trait LocationProvider {
    fn authorization_status(&self) -> AuthorizationState;

    /// Asks the user for access. Answers with
    /// [`LocationEvent::AuthorizationChanged`].
    fn request_permission(&mut self);

    /// Begins delivering readings, or a single failure.
    fn start_updates(&mut self);

    fn stop_updates(&mut self);
}

/// When a newly granted authorization should start an acquisition by itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum AutoStartPolicy {
    /// Every time authorization is granted.
    Always,

    /// Only when `start` was called before authorization was granted.
    #[default]
    WhenRequested,

    Never,
}

pub(crate) struct LocationAcquisitionController {
    provider: Box<dyn LocationProvider>,
    auto_start: AutoStartPolicy,

    authorization_state: AuthorizationState,
    last_fix: Option<Fix>,
    is_acquiring: bool,
    last_error: Option<String>,

    permission_requested: bool,
    start_pending: bool,
}

impl LocationAcquisitionController {
    pub(crate) fn new(provider: Box<dyn LocationProvider>, auto_start: AutoStartPolicy) -> Self {
        let authorization_state = provider.authorization_status();

        Self {
            provider,
            auto_start,
            authorization_state,
            last_fix: None,
            is_acquiring: false,
            last_error: None,
            permission_requested: false,
            start_pending: false,
        }
    }

    pub(crate) fn authorization_state(&self) -> AuthorizationState {
        self.authorization_state
    }

    pub(crate) fn last_fix(&self) -> Option<&Fix> {
        self.last_fix.as_ref()
    }

    pub(crate) fn is_acquiring(&self) -> bool {
        self.is_acquiring
    }

    pub(crate) fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Prompts for access, once per undetermined state.
    pub(crate) fn request_permission(&mut self) {
        if self.authorization_state != AuthorizationState::Undetermined || self.permission_requested {
            return;
        }

        debug!("requesting location permission");
        self.permission_requested = true;
        self.provider.request_permission();
    }

    /// Begins acquiring a fix.
    ///
    /// A no-op while an acquisition is already outstanding. Without
    /// authorization nothing starts, but the request is remembered for the
    /// auto-start policy.
    pub(crate) fn start(&mut self) {
        if self.is_acquiring {
            return;
        }

        if !self.authorization_state.is_authorized() {
            debug!(state = ?self.authorization_state, "start deferred until authorized");
            self.start_pending = true;
            return;
        }

        debug!("starting location acquisition");
        self.start_pending = false;
        self.last_error = None;
        self.is_acquiring = true;
        self.provider.start_updates();
    }

    /// Halts any outstanding acquisition. Always safe to call.
    pub(crate) fn stop(&mut self) {
        self.start_pending = false;
        if self.is_acquiring {
            debug!("stopping location acquisition");
            self.is_acquiring = false;
            self.provider.stop_updates();
        }
    }

    /// Applies an outcome reported by the provider.
    pub(crate) fn handle_event(&mut self, event: LocationEvent) {
        match event {
            LocationEvent::AuthorizationChanged(state) => self.authorization_changed(state),
            LocationEvent::Readings(readings) => self.readings_received(readings),
            LocationEvent::Failed(error) => self.acquisition_failed(error),
        }
    }

    fn authorization_changed(&mut self, state: AuthorizationState) {
        debug!(?state, "location authorization changed");
        self.authorization_state = state;

        if state == AuthorizationState::Undetermined {
            self.permission_requested = false;
            return;
        }

        if state.is_authorized() {
            let auto_start = match self.auto_start {
                AutoStartPolicy::Always => true,
                AutoStartPolicy::WhenRequested => self.start_pending,
                AutoStartPolicy::Never => false,
            };
            if auto_start {
                self.start();
            }
        } else {
            self.start_pending = false;
            if self.is_acquiring {
                let error = match state {
                    AuthorizationState::Restricted => LocationError::PermissionRestricted,
                    _ => LocationError::PermissionDenied,
                };
                self.last_error = Some(error.to_string());
                self.stop();
            }
        }
    }

    fn readings_received(&mut self, readings: Vec<Fix>) {
        if !self.is_acquiring {
            debug!("ignoring readings outside an acquisition");
            return;
        }

        if let Some(fix) = readings.last() {
            debug!(coordinate = %fix.coordinate, "location fix acquired");
            self.last_fix = Some(*fix);
            self.stop();
        }
    }

    fn acquisition_failed(&mut self, error: LocationError) {
        if !self.is_acquiring {
            debug!(%error, "ignoring failure outside an acquisition");
            return;
        }

        warn!(%error, "location acquisition failed");
        self.last_error = Some(error.to_string());
        self.stop();
    }
}


#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::{testing::{Calls, FakeProvider}, *};

    fn controller(
        status: AuthorizationState,
        policy: AutoStartPolicy,
    ) -> (LocationAcquisitionController, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let provider = FakeProvider {
            status,
            calls: Rc::clone(&calls),
        };
        (
            LocationAcquisitionController::new(Box::new(provider), policy),
            calls,
        )
    }

    fn fix(latitude: f64, longitude: f64) -> Fix {
        Fix {
            coordinate: Coordinate::new(latitude, longitude).unwrap(),
            timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn initial_state_comes_from_the_provider() {
        let (location, _) = controller(AuthorizationState::Denied, AutoStartPolicy::default());

        assert_eq!(location.authorization_state(), AuthorizationState::Denied);
        assert!(location.last_fix().is_none());
        assert!(!location.is_acquiring());
        assert!(location.last_error().is_none());
    }

    #[test]
    fn authorized_start_then_reading_yields_a_fix() {
        let (mut location, calls) =
            controller(AuthorizationState::AuthorizedFull, AutoStartPolicy::default());

        location.start();
        assert!(location.is_acquiring());

        location.handle_event(LocationEvent::Readings(vec![fix(48.8566, 2.3522)]));

        assert!(!location.is_acquiring());
        let last = location.last_fix().unwrap();
        assert_eq!(last.coordinate.latitude(), 48.8566);
        assert_eq!(last.coordinate.longitude(), 2.3522);
        assert_eq!(calls.borrow().stops, 1);
    }

    #[test]
    fn double_start_issues_one_provider_start_and_one_fix() {
        let (mut location, calls) =
            controller(AuthorizationState::AuthorizedFull, AutoStartPolicy::default());

        location.start();
        location.start();
        assert_eq!(calls.borrow().starts, 1);

        location.handle_event(LocationEvent::Readings(vec![fix(1.0, 1.0)]));
        location.handle_event(LocationEvent::Readings(vec![fix(2.0, 2.0)]));

        assert_eq!(location.last_fix(), Some(&fix(1.0, 1.0)));
        assert_eq!(calls.borrow().stops, 1);
    }

    #[test]
    fn the_most_recent_reading_in_a_batch_wins() {
        let (mut location, _) =
            controller(AuthorizationState::AuthorizedFull, AutoStartPolicy::default());

        location.start();
        location.handle_event(LocationEvent::Readings(vec![fix(1.0, 1.0), fix(3.0, 4.0)]));

        assert_eq!(location.last_fix(), Some(&fix(3.0, 4.0)));
    }

    #[test]
    fn readings_after_a_fix_are_ignored_until_restarted() {
        let (mut location, _) =
            controller(AuthorizationState::AuthorizedLimited, AutoStartPolicy::default());

        location.start();
        location.handle_event(LocationEvent::Readings(vec![fix(10.0, 10.0)]));
        location.handle_event(LocationEvent::Readings(vec![fix(20.0, 20.0)]));
        assert_eq!(location.last_fix(), Some(&fix(10.0, 10.0)));

        location.start();
        location.handle_event(LocationEvent::Readings(vec![fix(20.0, 20.0)]));
        assert_eq!(location.last_fix(), Some(&fix(20.0, 20.0)));
    }

    #[test]
    fn an_empty_batch_keeps_acquiring() {
        let (mut location, _) =
            controller(AuthorizationState::AuthorizedFull, AutoStartPolicy::default());

        location.start();
        location.handle_event(LocationEvent::Readings(vec![]));

        assert!(location.is_acquiring());
        assert!(location.last_fix().is_none());
    }

    #[test]
    fn failure_is_recorded_and_cleared_on_retry() {
        let (mut location, calls) =
            controller(AuthorizationState::AuthorizedFull, AutoStartPolicy::default());

        location.start();
        location.handle_event(LocationEvent::Failed(LocationError::Unavailable(
            "no signal".to_string(),
        )));

        assert!(!location.is_acquiring());
        assert_eq!(location.last_error(), Some("location unavailable: no signal"));
        assert!(location.last_fix().is_none());

        location.start();
        assert!(location.is_acquiring());
        assert!(location.last_error().is_none());
        assert_eq!(calls.borrow().starts, 2);
    }

    #[test]
    fn a_late_failure_does_not_overwrite_a_fix() {
        let (mut location, _) =
            controller(AuthorizationState::AuthorizedFull, AutoStartPolicy::default());

        location.start();
        location.handle_event(LocationEvent::Readings(vec![fix(5.0, 5.0)]));
        location.handle_event(LocationEvent::Failed(LocationError::Network("timeout".into())));

        assert!(location.last_error().is_none());
        assert_eq!(location.last_fix(), Some(&fix(5.0, 5.0)));
    }

    #[test]
    fn stop_is_idempotent() {
        let (mut location, calls) =
            controller(AuthorizationState::AuthorizedFull, AutoStartPolicy::default());

        location.stop();
        location.start();
        location.stop();
        location.stop();

        assert!(!location.is_acquiring());
        assert_eq!(calls.borrow().stops, 1);
    }

    #[test]
    fn start_without_authorization_does_nothing() {
        let (mut location, calls) =
            controller(AuthorizationState::Denied, AutoStartPolicy::default());

        location.start();

        assert!(!location.is_acquiring());
        assert_eq!(calls.borrow().starts, 0);
    }

    #[test]
    fn permission_is_requested_once_while_undetermined() {
        let (mut location, calls) =
            controller(AuthorizationState::Undetermined, AutoStartPolicy::default());

        location.request_permission();
        location.request_permission();
        assert_eq!(calls.borrow().permission_requests, 1);

        location.handle_event(LocationEvent::AuthorizationChanged(AuthorizationState::Denied));
        location.request_permission();
        assert_eq!(calls.borrow().permission_requests, 1);
    }

    #[test]
    fn permission_is_not_requested_once_decided() {
        let (mut location, calls) =
            controller(AuthorizationState::AuthorizedFull, AutoStartPolicy::default());

        location.request_permission();

        assert_eq!(calls.borrow().permission_requests, 0);
    }

    #[test]
    fn waiting_consumer_is_served_when_authorized() {
        let (mut location, calls) =
            controller(AuthorizationState::Undetermined, AutoStartPolicy::WhenRequested);

        location.start();
        location.request_permission();
        location.handle_event(LocationEvent::AuthorizationChanged(
            AuthorizationState::AuthorizedLimited,
        ));

        assert!(location.is_acquiring());
        assert_eq!(calls.borrow().starts, 1);
    }

    #[test]
    fn authorization_alone_does_not_start_when_nobody_waits() {
        let (mut location, calls) =
            controller(AuthorizationState::Undetermined, AutoStartPolicy::WhenRequested);

        location.request_permission();
        location.handle_event(LocationEvent::AuthorizationChanged(
            AuthorizationState::AuthorizedFull,
        ));

        assert!(!location.is_acquiring());
        assert_eq!(calls.borrow().starts, 0);
    }

    #[test]
    fn always_policy_starts_on_every_grant() {
        let (mut location, calls) =
            controller(AuthorizationState::Undetermined, AutoStartPolicy::Always);

        location.handle_event(LocationEvent::AuthorizationChanged(
            AuthorizationState::AuthorizedFull,
        ));

        assert!(location.is_acquiring());
        assert_eq!(calls.borrow().starts, 1);
    }

    #[test]
    fn never_policy_ignores_waiting_consumers() {
        let (mut location, calls) =
            controller(AuthorizationState::Undetermined, AutoStartPolicy::Never);

        location.start();
        location.handle_event(LocationEvent::AuthorizationChanged(
            AuthorizationState::AuthorizedFull,
        ));

        assert!(!location.is_acquiring());
        assert_eq!(calls.borrow().starts, 0);
    }

    #[test]
    fn revoked_authorization_ends_the_acquisition() {
        let (mut location, calls) =
            controller(AuthorizationState::AuthorizedFull, AutoStartPolicy::default());

        location.start();
        location.handle_event(LocationEvent::AuthorizationChanged(
            AuthorizationState::Restricted,
        ));

        assert!(!location.is_acquiring());
        assert_eq!(calls.borrow().stops, 1);
        assert_matches!(location.last_error(), Some(msg) if msg.contains("restricted"));
    }
}
