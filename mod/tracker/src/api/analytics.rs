use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::analytics::{MonthlyReport, WeeklyReport};
use crate::service::TrackerService;

pub fn routes() -> Router<TrackerService> {
    Router::new()
        .route("/analytics/weekly", get(weekly))
        .route("/analytics/monthly", get(monthly))
}

async fn weekly(State(svc): State<TrackerService>) -> Json<WeeklyReport> {
    Json(svc.weekly_analytics())
}

async fn monthly(State(svc): State<TrackerService>) -> Json<MonthlyReport> {
    Json(svc.monthly_analytics())
}
