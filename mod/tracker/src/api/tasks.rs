use axum::extract::{Path, Query, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use daytrack_core::ServiceError;

use crate::model::NewTask;
use crate::service::TrackerService;

pub fn routes() -> Router<TrackerService> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
}

/// Query parameters for `GET /api/tasks`.
#[derive(Debug, Default, Deserialize)]
pub struct TaskListQuery {
    #[serde(default)]
    pub status: Option<String>,
}

async fn list_tasks(
    State(svc): State<TrackerService>,
    Query(query): Query<TaskListQuery>,
) -> Json<Vec<Value>> {
    // an empty ?status= means "no filter"
    let status = query.status.as_deref().filter(|s| !s.is_empty());
    Json(svc.list_tasks(status))
}

async fn create_task(
    State(svc): State<TrackerService>,
    Json(input): Json<NewTask>,
) -> Result<Json<Value>, ServiceError> {
    let id = svc.create_task(input)?;
    Ok(Json(json!({ "id": id })))
}

async fn update_task(
    State(svc): State<TrackerService>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<Json<Value>, ServiceError> {
    let updated = svc.update_task(&id, &patch)?;
    Ok(Json(updated))
}

async fn delete_task(
    State(svc): State<TrackerService>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServiceError> {
    svc.delete_task(&id)?;
    Ok(Json(json!({ "ok": true })))
}
