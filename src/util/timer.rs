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

//! Cancellable one-shot timers.
//!
//! Controllers schedule delayed work through the [`Scheduler`] trait and keep
//! the returned [`TimerHandle`]. Cancelling the handle guarantees the work
//! will not run, provided it has not started already.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

pub(crate) type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a scheduled task.
#[derive(Debug, Clone, Default)]
pub(crate) struct TimerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

pub(crate) trait Scheduler {
    /// Runs `task` once after `delay` unless the returned handle is cancelled
    /// first.
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle;
}

/// Schedules each task on its own sleeping thread.
pub(crate) struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let handle = TimerHandle::new();
        let thread_handle = handle.clone();

        thread::spawn(move || {
            thread::sleep(delay);
            if !thread_handle.is_cancelled() {
                task();
            }
        });

        handle
    }
}


#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn thread_scheduler_runs_live_tasks() {
        let (tx, rx) = mpsc::channel();
        let _handle = ThreadScheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                tx.send(42).ok();
            }),
        );

        assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(42));
    }

    #[test]
    fn thread_scheduler_skips_cancelled_tasks() {
        let (tx, rx) = mpsc::channel::<i32>();
        let handle = ThreadScheduler.schedule(
            Duration::from_millis(50),
            Box::new(move || {
                tx.send(1).ok();
            }),
        );
        handle.cancel();

        assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
    }
}
