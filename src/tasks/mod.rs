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

//! Background application task processing.
//!
//! This module implements the command pattern used to offload work that may
//! block, such as place store queries and photo loading, from the main UI
//! thread. It provides a dedicated worker loop that translates [`AppTask`]
//! requests into store operations and broadcasts the results back to the
//! application via [`AppEvent`]s.
//!
//! Only actions that may block, or may take more than a trivial amount of time
//! to process, should be implemented as tasks. Other actions are likely more
//! suited to events.

mod handlers;

use std::{
    path::PathBuf,
    sync::mpsc::{Receiver, Sender},
    thread,
};

use anyhow::Result;
use rusqlite::Connection;
use tracing::{debug, error};
use uuid::Uuid;

use crate::{
    events::AppEvent,
    model::{Place, PlaceDraft, PlaceQuery},
    photo::PhotoHolder,
};

#[derive(Debug)]
pub(crate) enum AppTask {
    QueryPlaces(PlaceQuery),

    CreatePlace(PlaceDraft),
    UpdatePlace(Place),
    DeletePlace(Uuid),

    AttachPhoto(Uuid, PathBuf),
    RemovePhoto(Uuid),
}

/// Spawns a background thread to process application tasks.
///
/// The worker takes ownership of the database connection and enters a
/// blocking loop, listening for incoming [`AppTask`]s until the sending side
/// is dropped.
///
/// # Arguments
///
/// * `conn` - The open place store.
/// * `photos` - Loader used for photo attachments.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(
    conn: Connection,
    photos: PhotoHolder,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) {
    thread::spawn(move || {
        let mut conn = conn;

        while let Ok(task) = task_rx.recv() {
            debug!(?task, "processing task");

            let mut ctx = TaskContext {
                event_tx: &event_tx,
                conn: &mut conn,
                photos: &photos,
            };

            if let Err(e) = handle_task(task, &mut ctx) {
                error!("task failed: {:#}", e);
                let _ = event_tx.send(AppEvent::Error(format!("{:#}", e)));
            }
        }
    });
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
struct TaskContext<'a> {
    event_tx: &'a Sender<AppEvent>,
    conn: &'a mut Connection,
    photos: &'a PhotoHolder,
}

/// Orchestrates the execution of a single task.
fn handle_task(task: AppTask, ctx: &mut TaskContext) -> Result<()> {
    match task {
        AppTask::QueryPlaces(query) => handlers::query_places(ctx, query),

        AppTask::CreatePlace(draft) => handlers::create_place(ctx, draft),
        AppTask::UpdatePlace(place) => handlers::update_place(ctx, place),
        AppTask::DeletePlace(id) => handlers::delete_place(ctx, id),

        AppTask::AttachPhoto(id, path) => handlers::attach_photo(ctx, id, path),
        AppTask::RemovePhoto(id) => handlers::remove_photo(ctx, id),
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::mpsc};

    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;
    use crate::{db, model::Coordinate};

    struct Fixture {
        dir: TempDir,
        conn: Connection,
        photos: PhotoHolder,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let conn = db::init_db(dir.path().join("places.db")).unwrap();
            Self {
                dir,
                conn,
                photos: PhotoHolder::new(1024),
            }
        }

        fn run(&mut self, task: AppTask) -> (Result<()>, Vec<AppEvent>) {
            let (event_tx, event_rx) = mpsc::channel();
            let mut ctx = TaskContext {
                event_tx: &event_tx,
                conn: &mut self.conn,
                photos: &self.photos,
            };
            let result = handle_task(task, &mut ctx);
            drop(event_tx);
            (result, event_rx.iter().collect())
        }
    }

    fn draft(name: &str) -> PlaceDraft {
        PlaceDraft {
            name: name.to_string(),
            country: "Greece".to_string(),
            notes: String::new(),
            visited_on: NaiveDate::from_ymd_opt(2022, 8, 20).unwrap(),
            coordinate: Coordinate::new(37.9838, 23.7275).unwrap(),
            photo: None,
        }
    }

    fn saved_place(fixture: &mut Fixture, name: &str) -> Place {
        let (result, _) = fixture.run(AppTask::CreatePlace(draft(name)));
        result.unwrap();
        db::query_places(&fixture.conn, &PlaceQuery::default())
            .unwrap()
            .into_iter()
            .find(|p| p.name == name)
            .unwrap()
    }

    #[test]
    fn creating_a_place_announces_the_change() {
        let mut fixture = Fixture::new();

        let (result, events) = fixture.run(AppTask::CreatePlace(draft(" Athens ")));

        result.unwrap();
        assert_matches!(
            events.as_slice(),
            [AppEvent::PlacesChanged, AppEvent::PlaceCreated(coordinate), AppEvent::Status(msg)]
                if msg == "Saved Athens" && coordinate.latitude() == 37.9838
        );
        assert_eq!(db::query_places(&fixture.conn, &PlaceQuery::default()).unwrap().len(), 1);
    }

    #[test]
    fn invalid_drafts_are_rejected() {
        let mut fixture = Fixture::new();

        let (result, events) = fixture.run(AppTask::CreatePlace(draft("   ")));

        assert!(result.is_err());
        assert!(events.is_empty());
    }

    #[test]
    fn query_results_are_sent_back() {
        let mut fixture = Fixture::new();
        saved_place(&mut fixture, "Athens");

        let (result, events) = fixture.run(AppTask::QueryPlaces(PlaceQuery::default()));

        result.unwrap();
        assert_matches!(events.as_slice(), [AppEvent::SetPlaces(places)] if places.len() == 1);
    }

    #[test]
    fn deleting_an_unknown_place_is_reported() {
        let mut fixture = Fixture::new();

        let (result, events) = fixture.run(AppTask::DeletePlace(Uuid::new_v4()));

        result.unwrap();
        assert_matches!(events.as_slice(), [AppEvent::Status(msg)] if msg.contains("already gone"));
    }

    #[test]
    fn photos_can_be_attached_and_removed() {
        let mut fixture = Fixture::new();
        let athens = saved_place(&mut fixture, "Athens");
        let photo = fixture.dir.path().join("acropolis.jpg");
        fs::write(&photo, [1u8, 2, 3, 4]).unwrap();

        let (result, _) = fixture.run(AppTask::AttachPhoto(athens.id, photo));
        result.unwrap();
        let stored = db::fetch_place(&fixture.conn, athens.id).unwrap().unwrap();
        assert_eq!(stored.photo, Some(vec![1, 2, 3, 4]));

        let (result, _) = fixture.run(AppTask::RemovePhoto(athens.id));
        result.unwrap();
        let stored = db::fetch_place(&fixture.conn, athens.id).unwrap().unwrap();
        assert_eq!(stored.photo, None);
    }

    #[test]
    fn a_missing_photo_leaves_the_place_alone() {
        let mut fixture = Fixture::new();
        let athens = saved_place(&mut fixture, "Athens");
        let missing = fixture.dir.path().join("missing.jpg");

        let (result, events) = fixture.run(AppTask::AttachPhoto(athens.id, missing));

        result.unwrap();
        assert_matches!(events.as_slice(), [AppEvent::Status(msg)] if msg.starts_with("No photo"));
        let stored = db::fetch_place(&fixture.conn, athens.id).unwrap().unwrap();
        assert_eq!(stored.photo, None);
    }
}
