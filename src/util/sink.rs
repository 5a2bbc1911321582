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

//! Completion sinks.
//!
//! Providers report asynchronous outcomes by calling an [`EventSink`]. The
//! application wires each sink to its event channel so every outcome lands
//! back on the main loop.

use std::sync::{Arc, mpsc::Sender};

pub(crate) type EventSink<E> = Arc<dyn Fn(E) + Send + Sync>;

/// Builds a sink that wraps each event and forwards it down `tx`.
///
/// Send failures are ignored: a closed channel means the application is
/// shutting down and nobody is waiting for the outcome.
pub(crate) fn channel_sink<E, A>(tx: Sender<A>, wrap: fn(E) -> A) -> EventSink<E>
where
    E: 'static,
    A: Send + 'static,
{
    Arc::new(move |event| {
        let _ = tx.send(wrap(event));
    })
}
