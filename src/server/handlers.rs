//! Route handlers

use super::types::{check_payload_bounds, ApiError, BatchPayload};
use super::AppState;
use crate::error::Error;
use crate::ingest::{ingest_csv, ingest_rows, IngestResponse};
use crate::models::Entity;
use crate::report::{self, DepartmentHires, QuarterlyHires};
use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::debug;

/// Multipart field holding the CSV upload
const FILE_FIELD: &str = "file";

/// Service description
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "DB Migration REST API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "upload_departments_csv": "/upload/departments",
            "upload_jobs_csv": "/upload/jobs",
            "upload_employees_csv": "/upload/employees",
            "batch_insert_departments": "/batch/departments",
            "batch_insert_jobs": "/batch/jobs",
            "batch_insert_employees": "/batch/employees",
            "hired_by_quarter": "/metrics/hired-by-quarter",
            "departments_above_average": "/metrics/departments-above-average"
        }
    }))
}

/// `POST /upload/<kind>`: multipart CSV upload
pub async fn upload_csv<T: Entity>(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<IngestResponse>, ApiError> {
    let content = read_file_field(multipart).await?;
    debug!(kind = %T::KIND, bytes = content.len(), "Received CSV upload");

    let rows = ingest_csv::<T>(&state.store, &content).await?;
    Ok(Json(IngestResponse::uploaded::<T>(rows)))
}

/// `POST /batch/<kind>`: JSON batch insert
pub async fn batch_insert<B: BatchPayload>(
    State(state): State<AppState>,
    Json(payload): Json<B>,
) -> Result<Json<IngestResponse>, ApiError> {
    let rows = payload.into_rows();
    check_payload_bounds::<B::Row>(rows.len())?;

    let inserted = ingest_rows(&state.store, &rows).await?;
    Ok(Json(IngestResponse::inserted::<B::Row>(inserted)))
}

/// `GET /metrics/hired-by-quarter`
pub async fn hired_by_quarter(
    State(state): State<AppState>,
) -> Result<Json<Vec<QuarterlyHires>>, ApiError> {
    Ok(Json(report::hired_by_quarter(&state.store).await?))
}

/// `GET /metrics/departments-above-average`
pub async fn departments_above_average(
    State(state): State<AppState>,
) -> Result<Json<Vec<DepartmentHires>>, ApiError> {
    Ok(Json(report::departments_above_average(&state.store).await?))
}

async fn read_file_field(mut multipart: Multipart) -> Result<Vec<u8>, Error> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidPayload(e.body_text()))?
    {
        if field.name() == Some(FILE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| Error::InvalidPayload(e.body_text()))?;
            return Ok(bytes.to_vec());
        }
    }

    Err(Error::InvalidPayload(format!(
        "missing multipart field '{}'",
        FILE_FIELD
    )))
}
