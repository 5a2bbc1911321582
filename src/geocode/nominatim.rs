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

//! Nominatim forward geocoding.
//!
//! Queries an OpenStreetMap Nominatim compatible `/search` endpoint. Each
//! search runs on its own thread with a blocking HTTP client and reports back
//! through the completion it was given.

use std::{thread, time::Duration};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::{
    geocode::{GeocodeCompletion, GeocodeError, GeocodeResult, GeocodedPlace, GeocodingProvider},
    model::Coordinate,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

pub(crate) struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    search_url: String,
    limit: u32,
}

impl NominatimGeocoder {
    pub(crate) fn new(base_url: &str, user_agent: &str, limit: u32) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build geocoding HTTP client")?;

        Ok(Self {
            client,
            search_url: format!("{}/search", base_url.trim_end_matches('/')),
            limit: limit.max(1),
        })
    }
}

impl GeocodingProvider for NominatimGeocoder {
    fn search(&self, text: &str, complete: GeocodeCompletion) {
        let client = self.client.clone();
        let url = self.search_url.clone();
        let limit = self.limit.to_string();
        let text = text.to_string();

        thread::spawn(move || {
            let result = client
                .get(&url)
                .query(&[
                    ("q", text.as_str()),
                    ("format", "jsonv2"),
                    ("limit", limit.as_str()),
                ])
                .send()
                .map_err(|e| GeocodeError::Request(e.to_string()))
                .and_then(|response| {
                    let status = response.status();
                    if !status.is_success() {
                        return Err(GeocodeError::Status(status.as_u16()));
                    }
                    response
                        .text()
                        .map_err(|e| GeocodeError::Request(e.to_string()))
                })
                .and_then(|body| parse_results(&body));

            complete(result);
        });
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    name: Option<String>,
    display_name: Option<String>,
    lat: String,
    lon: String,
}

fn parse_results(body: &str) -> GeocodeResult {
    let places: Vec<NominatimPlace> =
        serde_json::from_str(body).map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

    let results = places
        .into_iter()
        .filter_map(|place| {
            let coordinate = place
                .lat
                .parse::<f64>()
                .ok()
                .zip(place.lon.parse::<f64>().ok())
                .and_then(|(lat, lon)| Coordinate::new(lat, lon).ok());

            let Some(coordinate) = coordinate else {
                debug!(lat = %place.lat, lon = %place.lon, "skipping result with bad coordinates");
                return None;
            };

            let name = place
                .name
                .filter(|n| !n.trim().is_empty())
                .or(place.display_name.filter(|n| !n.trim().is_empty()));

            Some(GeocodedPlace { name, coordinate })
        })
        .collect();

    Ok(results)
}
