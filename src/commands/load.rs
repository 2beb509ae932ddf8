//! Load command: run a local CSV file through the ingestion pipeline

use crate::error::Result;
use crate::ingest::{ingest_csv, IngestResponse};
use crate::models::{Department, Employee, Entity, EntityKind, Job};
use crate::store::EntityStore;
use std::path::Path;
use tracing::info;

/// Ingest one CSV file (no header row) as a single batch
pub async fn cmd_load(store: &EntityStore, kind: EntityKind, path: &Path) -> Result<IngestResponse> {
    info!("Loading {} from {:?}", kind.plural(), path);
    let content = std::fs::read(path)?;

    match kind {
        EntityKind::Department => load_as::<Department>(store, &content).await,
        EntityKind::Job => load_as::<Job>(store, &content).await,
        EntityKind::Employee => load_as::<Employee>(store, &content).await,
    }
}

async fn load_as<T: Entity>(store: &EntityStore, content: &[u8]) -> Result<IngestResponse> {
    let rows = ingest_csv::<T>(store, content).await?;
    Ok(IngestResponse::uploaded::<T>(rows))
}

/// Print a load result to console
pub fn print_load_result(response: &IngestResponse) {
    println!("✓ {}", response.message);
}
