//! Request payloads and error responses for the HTTP API

use crate::error::Error;
use crate::ingest::{MAX_BATCH_ROWS, MIN_BATCH_ROWS};
use crate::models::{Department, Employee, Entity, Job};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

/// A JSON batch body: one named array of rows
pub trait BatchPayload: DeserializeOwned + Send + 'static {
    type Row: Entity;

    fn into_rows(self) -> Vec<Self::Row>;
}

/// `{"departments": [...]}`
#[derive(Debug, Deserialize)]
pub struct DepartmentBatch {
    pub departments: Vec<Department>,
}

/// `{"jobs": [...]}`
#[derive(Debug, Deserialize)]
pub struct JobBatch {
    pub jobs: Vec<Job>,
}

/// `{"employees": [...]}`
#[derive(Debug, Deserialize)]
pub struct EmployeeBatch {
    pub employees: Vec<Employee>,
}

impl BatchPayload for DepartmentBatch {
    type Row = Department;

    fn into_rows(self) -> Vec<Department> {
        self.departments
    }
}

impl BatchPayload for JobBatch {
    type Row = Job;

    fn into_rows(self) -> Vec<Job> {
        self.jobs
    }
}

impl BatchPayload for EmployeeBatch {
    type Row = Employee;

    fn into_rows(self) -> Vec<Employee> {
        self.employees
    }
}

/// Request-level bound check on a JSON array, before it reaches ingestion
pub fn check_payload_bounds<T: Entity>(len: usize) -> Result<(), Error> {
    if (MIN_BATCH_ROWS..=MAX_BATCH_ROWS).contains(&len) {
        return Ok(());
    }
    Err(Error::InvalidPayload(format!(
        "'{}' must hold between {} and {} rows, got {}",
        T::KIND.plural(),
        MIN_BATCH_ROWS,
        MAX_BATCH_ROWS,
        len
    )))
}

/// Error wrapper that renders as `{"detail": ...}` with a matching status
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::InvalidPayload(_) => StatusCode::UNPROCESSABLE_ENTITY,
            e if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status.is_server_error() {
            error!("Request failed: {}", self.0);
            format!("Internal server error: {}", self.0)
        } else {
            warn!("Rejected request: {}", self.0);
            self.0.to_string()
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
