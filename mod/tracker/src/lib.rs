pub mod analytics;
pub mod api;
pub mod demo;
pub mod model;
pub mod service;
pub mod wire;

use std::sync::Arc;

use axum::Router;
use daytrack_core::Module;
use daytrack_docstore::DocStore;

use service::TrackerService;

/// The tracker module — tasks, worklogs, notes, activity feed, and
/// weekly/monthly analytics.
///
/// Owns the (optional) document store handle. Without a store the module
/// runs in demo mode: reads serve static payloads, writes return 503.
pub struct TrackerModule {
    svc: TrackerService,
}

impl TrackerModule {
    pub fn new(store: Option<Arc<dyn DocStore>>) -> Self {
        Self {
            svc: TrackerService::new(store),
        }
    }
}

impl Module for TrackerModule {
    fn name(&self) -> &str {
        "tracker"
    }

    fn routes(&self) -> Router {
        api::router(self.svc.clone())
    }
}
