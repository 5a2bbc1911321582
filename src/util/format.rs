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

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Formats a visit date the way it is shown in lists, e.g. `12 Sep 2023`.
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Parses a date typed on the command line.
///
/// Accepts ISO `YYYY-MM-DD`, and the words `today` and `yesterday`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(parse_date("2023-09-12", today), NaiveDate::from_ymd_opt(2023, 9, 12));
/// ```
pub(crate) fn parse_date(value: &str, today: NaiveDate) -> Option<NaiveDate> {
    match value.trim().to_ascii_lowercase().as_str() {
        "today" => Some(today),
        "yesterday" => today.pred_opt(),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").ok(),
    }
}

/// Formats a fix timestamp in local time, e.g. `14:03:27`.
pub(crate) fn format_fix_time(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Formats a byte count using binary units, e.g. `2.4 MiB`.
pub(crate) fn format_size(bytes: usize) -> String {
    const UNITS: [&str; 3] = ["KiB", "MiB", "GiB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}
