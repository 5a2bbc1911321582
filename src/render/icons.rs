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

//! Unicode symbols for the TUI.
//!
//! These are plain text symbols rather than emoji, so they take the colour of
//! the surrounding style and occupy a single cell in most terminal fonts.

pub(crate) const ICON_PIN: &str = "\u{25C9}";
pub(crate) const ICON_FIX: &str = "\u{2316}";
pub(crate) const ICON_PHOTO: &str = "\u{25A3}";
pub(crate) const ICON_SEARCHING: &str = "\u{2026}";
