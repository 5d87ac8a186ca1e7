use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use daytrack_core::ServiceError;

use crate::model::NewWorklog;
use crate::service::TrackerService;

pub fn routes() -> Router<TrackerService> {
    Router::new().route("/worklogs", get(list_worklogs).post(create_worklog))
}

async fn list_worklogs(State(svc): State<TrackerService>) -> Json<Vec<Value>> {
    Json(svc.list_worklogs())
}

async fn create_worklog(
    State(svc): State<TrackerService>,
    Json(input): Json<NewWorklog>,
) -> Result<Json<Value>, ServiceError> {
    let id = svc.create_worklog(input)?;
    Ok(Json(json!({ "id": id })))
}
