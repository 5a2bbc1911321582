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

//! IP geolocation provider.
//!
//! A terminal has no positioning hardware, so the current location is
//! resolved from the public address of the machine via an HTTP endpoint that
//! answers with JSON `latitude` and `longitude` fields. Such a position is
//! approximate, which is reported as [`AuthorizationState::AuthorizedLimited`].

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    location::{AuthorizationState, Fix, LocationError, LocationEvent, LocationProvider},
    model::Coordinate,
    util::sink::EventSink,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// How the user has chosen to share their location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum LocationAccess {
    /// Undecided until the user is asked.
    #[default]
    Ask,
    Approximate,
    Denied,
}

pub(crate) struct GeoIpLocationProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
    access: LocationAccess,
    sink: EventSink<LocationEvent>,
    in_flight: Option<Arc<AtomicBool>>,
}

impl GeoIpLocationProvider {
    pub(crate) fn new(
        endpoint: &str,
        user_agent: &str,
        access: LocationAccess,
        sink: EventSink<LocationEvent>,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build location HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.trim().to_string(),
            access,
            sink,
            in_flight: None,
        })
    }

    fn status_for(endpoint: &str, access: LocationAccess) -> AuthorizationState {
        if endpoint.is_empty() {
            return AuthorizationState::Restricted;
        }

        match access {
            LocationAccess::Ask => AuthorizationState::Undetermined,
            LocationAccess::Approximate => AuthorizationState::AuthorizedLimited,
            LocationAccess::Denied => AuthorizationState::Denied,
        }
    }
}

impl LocationProvider for GeoIpLocationProvider {
    fn authorization_status(&self) -> AuthorizationState {
        Self::status_for(&self.endpoint, self.access)
    }

    fn request_permission(&mut self) {
        let outcome = match self.authorization_status() {
            // Asking from inside the application is consent to an
            // approximate lookup.
            AuthorizationState::Undetermined => {
                self.access = LocationAccess::Approximate;
                AuthorizationState::AuthorizedLimited
            }
            decided => decided,
        };

        (self.sink)(LocationEvent::AuthorizationChanged(outcome));
    }

    fn start_updates(&mut self) {
        self.stop_updates();

        let cancelled = Arc::new(AtomicBool::new(false));
        self.in_flight = Some(Arc::clone(&cancelled));

        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let sink = Arc::clone(&self.sink);

        debug!(%endpoint, "looking up location");
        thread::spawn(move || {
            let event = match lookup(&client, &endpoint) {
                Ok(fix) => LocationEvent::Readings(vec![fix]),
                Err(error) => {
                    warn!(%error, "location lookup failed");
                    LocationEvent::Failed(error)
                }
            };

            if !cancelled.load(Ordering::SeqCst) {
                sink(event);
            }
        });
    }

    fn stop_updates(&mut self) {
        if let Some(cancelled) = self.in_flight.take() {
            cancelled.store(true, Ordering::SeqCst);
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeoIpResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

fn lookup(client: &reqwest::blocking::Client, endpoint: &str) -> Result<Fix, LocationError> {
    let response = client
        .get(endpoint)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| LocationError::Network(e.to_string()))?;

    let body = response
        .text()
        .map_err(|e| LocationError::Network(e.to_string()))?;

    parse_response(&body, Utc::now())
}

fn parse_response(body: &str, timestamp: DateTime<Utc>) -> Result<Fix, LocationError> {
    let response: GeoIpResponse =
        serde_json::from_str(body).map_err(|e| LocationError::InvalidResponse(e.to_string()))?;

    if response.error {
        let reason = response.reason.unwrap_or_else(|| "unknown reason".to_string());
        return Err(LocationError::Unavailable(reason));
    }

    let (Some(latitude), Some(longitude)) = (response.latitude, response.longitude) else {
        return Err(LocationError::InvalidResponse(
            "missing latitude or longitude".to_string(),
        ));
    };

    let coordinate = Coordinate::new(latitude, longitude)
        .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;

    Ok(Fix {
        coordinate,
        timestamp,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;
    use crate::util::sink::channel_sink;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn parses_a_position() {
        let body = r#"{"ip":"203.0.113.7","city":"Paris","latitude":48.8566,"longitude":2.3522}"#;

        let fix = parse_response(body, now()).unwrap();

        assert_eq!(fix.coordinate, Coordinate::new(48.8566, 2.3522).unwrap());
        assert_eq!(fix.timestamp, now());
    }

    #[test]
    fn reports_service_errors_as_unavailable() {
        let body = r#"{"error":true,"reason":"RateLimited"}"#;

        assert_matches!(
            parse_response(body, now()),
            Err(LocationError::Unavailable(reason)) if reason == "RateLimited"
        );
    }

    #[test]
    fn rejects_missing_or_invalid_coordinates() {
        assert_matches!(
            parse_response(r#"{"latitude":48.8}"#, now()),
            Err(LocationError::InvalidResponse(_))
        );
        assert_matches!(
            parse_response(r#"{"latitude":123.0,"longitude":2.0}"#, now()),
            Err(LocationError::InvalidResponse(_))
        );
        assert_matches!(
            parse_response("<html>", now()),
            Err(LocationError::InvalidResponse(_))
        );
    }

    #[test]
    fn status_follows_access_setting() {
        let endpoint = "https://ipapi.co/json/";

        assert_eq!(
            GeoIpLocationProvider::status_for(endpoint, LocationAccess::Ask),
            AuthorizationState::Undetermined
        );
        assert_eq!(
            GeoIpLocationProvider::status_for(endpoint, LocationAccess::Approximate),
            AuthorizationState::AuthorizedLimited
        );
        assert_eq!(
            GeoIpLocationProvider::status_for(endpoint, LocationAccess::Denied),
            AuthorizationState::Denied
        );
        assert_eq!(
            GeoIpLocationProvider::status_for("", LocationAccess::Approximate),
            AuthorizationState::Restricted
        );
    }

    #[test]
    fn asking_grants_approximate_access() {
        let (tx, rx) = mpsc::channel();
        let sink = channel_sink(tx, |e: LocationEvent| e);
        let mut provider =
            GeoIpLocationProvider::new("https://ipapi.co/json/", "travelog-test", LocationAccess::Ask, sink)
                .unwrap();

        provider.request_permission();

        assert_eq!(
            rx.try_recv(),
            Ok(LocationEvent::AuthorizationChanged(AuthorizationState::AuthorizedLimited))
        );
        assert_eq!(provider.authorization_status(), AuthorizationState::AuthorizedLimited);
    }

    #[test]
    fn asking_again_after_denial_repeats_the_decision() {
        let (tx, rx) = mpsc::channel();
        let sink = channel_sink(tx, |e: LocationEvent| e);
        let mut provider =
            GeoIpLocationProvider::new("https://ipapi.co/json/", "travelog-test", LocationAccess::Denied, sink)
                .unwrap();

        provider.request_permission();

        assert_eq!(
            rx.try_recv(),
            Ok(LocationEvent::AuthorizationChanged(AuthorizationState::Denied))
        );
    }
}
