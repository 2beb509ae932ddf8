//! HTTP API server
//!
//! Exposes CSV uploads, JSON batch inserts and the hiring reports over
//! axum. Each request works against the shared connection pool; ingestion
//! opens its own transaction.

mod handlers;
mod types;

pub use types::{ApiError, BatchPayload, DepartmentBatch, EmployeeBatch, JobBatch};

use crate::config::Config;
use crate::error::Result;
use crate::models::{Department, Employee, Job};
use crate::store::EntityStore;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tracing::info;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: EntityStore,
}

/// Build the application router
pub fn router(store: EntityStore, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/upload/departments", post(handlers::upload_csv::<Department>))
        .route("/upload/jobs", post(handlers::upload_csv::<Job>))
        .route("/upload/employees", post(handlers::upload_csv::<Employee>))
        .route(
            "/batch/departments",
            post(handlers::batch_insert::<DepartmentBatch>),
        )
        .route("/batch/jobs", post(handlers::batch_insert::<JobBatch>))
        .route(
            "/batch/employees",
            post(handlers::batch_insert::<EmployeeBatch>),
        )
        .route(
            "/metrics/hired-by-quarter",
            get(handlers::hired_by_quarter),
        )
        .route(
            "/metrics/departments-above-average",
            get(handlers::departments_above_average),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(AppState { store })
}

/// HTTP server bound to the configured address
pub struct ApiServer {
    config: Config,
    store: EntityStore,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: Config, store: EntityStore) -> Self {
        Self { config, store }
    }

    /// Serve until Ctrl-C
    pub async fn run(self) -> Result<()> {
        let addr = self.config.socket_addr()?;
        let app = router(self.store, self.config.server.max_body_bytes);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("API server listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("API server shutting down");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
