//! The power ranger resource

use crate::models::{
    Deleted, PowerRanger, RangerId, RangerIds, RangerName, RangerQuery, Schemas,
};
use crate::store::RangerStore;
use genz_rs::prelude::*;
use std::sync::Arc;

pub const NAME: &str = "Power Rangers";
pub const BASE_PATH: &str = "/power-ranger";

pub fn options() -> RouterOptions {
    RouterOptions::new(NAME, BASE_PATH)
}

/// Declare every power ranger route against `store`
pub fn declare(rangers: &mut ResourceRouter<'_>, store: Arc<dyn RangerStore>) {
    let s = Schemas::new();

    let db = store.clone();
    rangers.get(
        "/",
        RouteSpec::new(s.ranger.clone().array().typed::<Vec<PowerRanger>>())
            .query(s.query.clone().typed::<RangerQuery>()),
        move |input: Input<(), RangerQuery>| {
            let db = db.clone();
            async move { list(db.as_ref(), input.query).await }
        },
    );

    let db = store.clone();
    rangers.get(
        "/:id",
        RouteSpec::new(s.ranger.clone().typed::<PowerRanger>())
            .params(s.id.clone().typed::<RangerId>()),
        move |input: Input<RangerId>| {
            let db = db.clone();
            async move { find(db.as_ref(), input.params.id).await }
        },
    );

    let db = store.clone();
    rangers.post(
        "/",
        RouteSpec::new(s.ranger.clone().typed::<PowerRanger>())
            .body(s.name.clone().typed::<RangerName>()),
        move |input: Input<(), (), RangerName>| {
            let db = db.clone();
            async move { Ok::<_, ApiError>(db.create(input.body.name).await) }
        },
    );

    let db = store.clone();
    rangers.put(
        "/:id",
        RouteSpec::new(s.ranger.clone().typed::<PowerRanger>())
            .params(s.id.clone().typed::<RangerId>())
            .body(s.name.clone().typed::<RangerName>()),
        move |input: Input<RangerId, (), RangerName>| {
            let db = db.clone();
            async move {
                let id = input.params.id;
                db.update(id, input.body.name)
                    .await
                    .ok_or_else(|| not_found(id))
            }
        },
    );

    let db = store.clone();
    rangers.delete(
        "/:id",
        RouteSpec::new(s.ranger.clone().typed::<PowerRanger>())
            .params(s.id.clone().typed::<RangerId>()),
        move |input: Input<RangerId>| {
            let db = db.clone();
            async move {
                let id = input.params.id;
                db.delete(id).await.ok_or_else(|| not_found(id))
            }
        },
    );

    let db = store;
    rangers.delete(
        RoutePath::new("/").operation_id("deleteManyPowerRangers"),
        RouteSpec::new(s.deleted.typed::<Deleted>()).body(s.ids.typed::<RangerIds>()),
        move |input: Input<(), (), RangerIds>| {
            let db = db.clone();
            async move {
                let deleted = db.delete_many(&input.body.ids).await;
                info!(deleted, "Deleted power rangers");
                Ok::<_, ApiError>(Deleted { deleted })
            }
        },
    );
}

async fn list(db: &dyn RangerStore, query: RangerQuery) -> Result<Vec<PowerRanger>> {
    let rangers = match &query.name {
        Some(name) => db.search(name).await,
        None => db.find_all().await,
    };

    Ok(match query.seasons {
        Some(seasons) => rangers
            .into_iter()
            .filter(|r| seasons.iter().any(|&season| r.appeared_in(season)))
            .collect(),
        None => rangers,
    })
}

async fn find(db: &dyn RangerStore, id: u32) -> Result<PowerRanger> {
    db.find_by_id(id).await.ok_or_else(|| not_found(id))
}

fn not_found(id: u32) -> ApiError {
    ApiError::not_found(format!("Power ranger {} not found", id))
}
