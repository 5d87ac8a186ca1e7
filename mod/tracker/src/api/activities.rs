use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

use crate::service::TrackerService;

pub fn routes() -> Router<TrackerService> {
    Router::new().route("/activities", get(list_activities))
}

/// Query parameters for `GET /api/activities`.
#[derive(Debug, Deserialize)]
pub struct ActivityListQuery {
    /// Max entries to return, newest first.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    20
}

impl Default for ActivityListQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

async fn list_activities(
    State(svc): State<TrackerService>,
    Query(query): Query<ActivityListQuery>,
) -> Json<Vec<Value>> {
    Json(svc.list_activities(query.limit))
}
