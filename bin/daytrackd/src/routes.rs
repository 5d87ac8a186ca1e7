//! Route registration — system endpoints + the tracker API.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use daytrack_docstore::DocStore;

/// Application shared state for the system endpoints.
#[derive(Clone)]
pub struct AppState {
    pub store: Option<Arc<dyn DocStore>>,
}

/// Build the complete router. The tracker API is nested under `/api`
/// (the public contract). CORS is wide open: this is a personal tool
/// and its UI may be served from anywhere.
pub fn build_router(state: AppState, api: Router) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/version", get(version))
        .with_state(state)
        .nest("/api", api)
        .layer(CorsLayer::permissive())
}

async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Daytrack API is running",
    }))
}

/// Process status plus store availability, probed with a collection
/// listing.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let (store, collections) = match &state.store {
        None => ("unconfigured".to_string(), Vec::new()),
        Some(s) => match s.list_collections() {
            Ok(mut names) => {
                names.truncate(10);
                ("available".to_string(), names)
            }
            Err(e) => (format!("error: {e}"), Vec::new()),
        },
    };
    Json(serde_json::json!({
        "status": "ok",
        "store": store,
        "collections": collections,
    }))
}

async fn version() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "daytrackd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
