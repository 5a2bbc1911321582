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

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use uuid::Uuid;

use crate::{
    db,
    events::AppEvent,
    model::{Place, PlaceDraft, PlaceQuery},
    tasks::TaskContext,
};

pub(super) fn query_places(ctx: &mut TaskContext, query: PlaceQuery) -> Result<()> {
    let places = db::query_places(ctx.conn, &query)?;
    ctx.event_tx.send(AppEvent::SetPlaces(places))?;

    Ok(())
}

pub(super) fn create_place(ctx: &mut TaskContext, draft: PlaceDraft) -> Result<()> {
    let place = draft.into_place()?;
    db::insert_place(ctx.conn, &place)?;
    info!(id = %place.id, name = %place.name, "place created");

    ctx.event_tx.send(AppEvent::PlacesChanged)?;
    ctx.event_tx.send(AppEvent::PlaceCreated(place.coordinate))?;
    ctx.event_tx
        .send(AppEvent::Status(format!("Saved {}", place.name)))?;

    Ok(())
}

pub(super) fn update_place(ctx: &mut TaskContext, place: Place) -> Result<()> {
    db::update_place(ctx.conn, &place)?;
    info!(id = %place.id, name = %place.name, "place updated");

    ctx.event_tx.send(AppEvent::PlacesChanged)?;
    ctx.event_tx
        .send(AppEvent::Status(format!("Updated {}", place.name)))?;

    Ok(())
}

pub(super) fn delete_place(ctx: &mut TaskContext, id: Uuid) -> Result<()> {
    if db::delete_place(ctx.conn, id)? {
        info!(%id, "place deleted");
        ctx.event_tx.send(AppEvent::PlacesChanged)?;
        ctx.event_tx.send(AppEvent::Status("Place deleted".to_string()))?;
    } else {
        ctx.event_tx
            .send(AppEvent::Status("That place was already gone".to_string()))?;
    }

    Ok(())
}

pub(super) fn attach_photo(ctx: &mut TaskContext, id: Uuid, path: PathBuf) -> Result<()> {
    let Some(bytes) = ctx.photos.load(&path)? else {
        ctx.event_tx
            .send(AppEvent::Status(format!("No photo at {}", path.display())))?;
        return Ok(());
    };

    let mut place = fetch_existing(ctx, id)?;
    place.photo = Some(bytes);
    db::update_place(ctx.conn, &place)?;
    info!(%id, path = %path.display(), "photo attached");

    ctx.event_tx.send(AppEvent::PlacesChanged)?;
    ctx.event_tx
        .send(AppEvent::Status(format!("Photo added to {}", place.name)))?;

    Ok(())
}

pub(super) fn remove_photo(ctx: &mut TaskContext, id: Uuid) -> Result<()> {
    let mut place = fetch_existing(ctx, id)?;
    place.photo = None;
    db::update_place(ctx.conn, &place)?;

    ctx.event_tx.send(AppEvent::PlacesChanged)?;
    ctx.event_tx
        .send(AppEvent::Status(format!("Photo removed from {}", place.name)))?;

    Ok(())
}

fn fetch_existing(ctx: &mut TaskContext, id: Uuid) -> Result<Place> {
    db::fetch_place(ctx.conn, id)?.with_context(|| format!("No place with id {}", id))
}
