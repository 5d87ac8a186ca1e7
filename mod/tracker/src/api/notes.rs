use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use daytrack_core::ServiceError;

use crate::model::NewNote;
use crate::service::TrackerService;

pub fn routes() -> Router<TrackerService> {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/{id}", put(update_note).delete(delete_note))
}

async fn list_notes(State(svc): State<TrackerService>) -> Json<Vec<Value>> {
    Json(svc.list_notes())
}

async fn create_note(
    State(svc): State<TrackerService>,
    Json(input): Json<NewNote>,
) -> Result<Json<Value>, ServiceError> {
    let id = svc.create_note(input)?;
    Ok(Json(json!({ "id": id })))
}

async fn update_note(
    State(svc): State<TrackerService>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<Json<Value>, ServiceError> {
    let updated = svc.update_note(&id, &patch)?;
    Ok(Json(updated))
}

async fn delete_note(
    State(svc): State<TrackerService>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServiceError> {
    svc.delete_note(&id)?;
    Ok(Json(json!({ "ok": true })))
}
