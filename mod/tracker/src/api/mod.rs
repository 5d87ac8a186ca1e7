pub mod activities;
pub mod analytics;
pub mod notes;
pub mod seed;
pub mod tasks;
pub mod worklogs;

use axum::Router;

use crate::service::TrackerService;

/// Assemble the public API surface. The server binary nests this router
/// under `/api`.
pub fn router(svc: TrackerService) -> Router {
    Router::new()
        .merge(tasks::routes())
        .merge(worklogs::routes())
        .merge(notes::routes())
        .merge(activities::routes())
        .merge(analytics::routes())
        .merge(seed::routes())
        .with_state(svc)
}
