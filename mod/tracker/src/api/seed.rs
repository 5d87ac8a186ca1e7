use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use daytrack_core::ServiceError;

use crate::service::TrackerService;

pub fn routes() -> Router<TrackerService> {
    Router::new().route("/seed-dummy", post(seed_dummy))
}

/// Install a small demo dataset: 3 tasks, 7 worklogs, 2 notes.
async fn seed_dummy(
    State(svc): State<TrackerService>,
) -> Result<Json<Value>, ServiceError> {
    svc.seed_dummy()?;
    Ok(Json(json!({ "ok": true })))
}
