//! `daytrackd` — the Daytrack server binary.
//!
//! Usage:
//!   daytrackd [--data-dir PATH] [--db PATH] [--listen ADDR]
//!
//! Without a database location the server still starts, in demo mode:
//! reads serve static demo payloads, writes return 503. The listen
//! address falls back to the `PORT` environment variable, then 8000.

mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use daytrack_core::{Module, ServiceConfig};
use daytrack_docstore::{DocStore, RedbStore};
use tracing::{info, warn};

use routes::AppState;
use tracker::TrackerModule;

/// Daytrack server.
#[derive(Parser, Debug)]
#[command(name = "daytrackd", about = "Daytrack personal productivity server")]
struct Cli {
    /// Directory holding the document database.
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Path to the document database file (overrides {data-dir}/data.redb).
    #[arg(long = "db")]
    db: Option<PathBuf>,

    /// Listen address (overrides PORT / the default 0.0.0.0:8000).
    #[arg(long = "listen")]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let listen = cli.listen.unwrap_or_else(|| match std::env::var("PORT") {
        Ok(port) => format!("0.0.0.0:{port}"),
        Err(_) => ServiceConfig::default().listen,
    });
    let config = ServiceConfig {
        data_dir: cli.data_dir,
        db_path: cli.db,
        listen,
    };

    // Open the document store. Demo mode on any failure: the service
    // stays up without a database.
    let store: Option<Arc<dyn DocStore>> = if !config.store_configured() {
        warn!("no database configured, starting in demo mode");
        None
    } else {
        let path = config.resolve_db_path();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        match RedbStore::open(&path) {
            Ok(store) => {
                info!("document store ready at {}", path.display());
                Some(Arc::new(store))
            }
            Err(e) => {
                warn!(
                    "failed to open document store at {}: {e}; starting in demo mode",
                    path.display()
                );
                None
            }
        }
    };

    let module = TrackerModule::new(store.clone());
    info!("{} module initialized", module.name());

    let state = AppState { store };
    let app = routes::build_router(state, module.routes());

    // Start server.
    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    info!("daytrackd listening on {}", config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
