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

//! Application configuration.
//!
//! This module manages the application configuration file. Missing fields
//! take their defaults, so older or hand-written files keep working.

use serde::{Deserialize, Serialize};

use crate::{
    geocode::{DEFAULT_DEBOUNCE, DEFAULT_MIN_QUERY_LEN},
    location::{AutoStartPolicy, geoip::LocationAccess},
};

const CONFIG_NAME: &str = "travelog";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,
    pub(crate) database_file: String,
    pub(crate) log_file: String,
    pub(crate) search: SearchConfig,
    pub(crate) geocoder: GeocoderConfig,
    pub(crate) location: LocationConfig,
    pub(crate) photos: PhotoConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct SearchConfig {
    pub(crate) debounce_ms: u64,
    pub(crate) min_query_len: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct GeocoderConfig {
    pub(crate) base_url: String,
    pub(crate) user_agent: String,
    pub(crate) limit: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct LocationConfig {
    pub(crate) endpoint: String,
    pub(crate) access: LocationAccess,
    pub(crate) auto_start: AutoStartPolicy,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct PhotoConfig {
    pub(crate) max_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            database_file: "places.db".to_string(),
            log_file: "travelog.log".to_string(),
            search: SearchConfig::default(),
            geocoder: GeocoderConfig::default(),
            location: LocationConfig::default(),
            photos: PhotoConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("travelog/", env!("CARGO_PKG_VERSION")).to_string(),
            limit: 10,
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://ipapi.co/json/".to_string(),
            access: LocationAccess::default(),
            auto_start: AutoStartPolicy::default(),
        }
    }
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

pub(crate) fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

pub(crate) fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}
