//! Read-only hiring reports over the entity store

mod queries;

pub use queries::*;

use crate::error::Result;
use crate::store::EntityStore;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::debug;

/// Reports only count hires whose datetime starts with this year
pub const HIRING_YEAR: &str = "2021";

/// Hires for one (department, job) pair, per quarter
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct QuarterlyHires {
    pub department: String,
    pub job: String,
    #[serde(rename = "Q1")]
    pub q1: i64,
    #[serde(rename = "Q2")]
    pub q2: i64,
    #[serde(rename = "Q3")]
    pub q3: i64,
    #[serde(rename = "Q4")]
    pub q4: i64,
}

/// A department and its hire count for the year
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct DepartmentHires {
    pub id: i64,
    pub department: String,
    pub hired: i64,
}

/// Hires per department and job in each quarter of 2021, ordered by
/// department then job
pub async fn hired_by_quarter(store: &EntityStore) -> Result<Vec<QuarterlyHires>> {
    let rows = sqlx::query_as::<_, QuarterlyHires>(HIRED_BY_QUARTER_SQL)
        .bind(HIRING_YEAR)
        .fetch_all(store.pool())
        .await?;
    debug!(rows = rows.len(), "Computed hired-by-quarter report");
    Ok(rows)
}

/// Departments that hired strictly more than the mean in 2021, most hires
/// first. Equal counts are ordered by department id.
pub async fn departments_above_average(store: &EntityStore) -> Result<Vec<DepartmentHires>> {
    let rows = sqlx::query_as::<_, DepartmentHires>(DEPARTMENTS_ABOVE_AVERAGE_SQL)
        .bind(HIRING_YEAR)
        .fetch_all(store.pool())
        .await?;
    debug!(rows = rows.len(), "Computed departments-above-average report");
    Ok(rows)
}
