//! Batch ingestion
//!
//! CSV uploads go through decode, size check, column check, coercion and a
//! single-transaction insert. JSON batches arrive already typed and go through
//! the size check, the same per-row content check, and the insert. Nothing is written unless every step
//! before the insert succeeds.

mod batch;

pub use batch::*;

use crate::error::{Error, Result};
use crate::models::Entity;
use crate::parse::{decode_csv, Record};
use crate::store::EntityStore;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Outcome of a successful ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResponse {
    pub message: String,
    pub rows_inserted: usize,
}

impl IngestResponse {
    /// Response for a CSV upload
    pub fn uploaded<T: Entity>(rows_inserted: usize) -> Self {
        Self {
            message: format!(
                "Successfully uploaded {} {}",
                rows_inserted,
                T::KIND.plural()
            ),
            rows_inserted,
        }
    }

    /// Response for a JSON batch
    pub fn inserted<T: Entity>(rows_inserted: usize) -> Self {
        Self {
            message: format!(
                "Successfully inserted {} {}",
                rows_inserted,
                T::KIND.plural()
            ),
            rows_inserted,
        }
    }
}

/// Ingest a CSV upload (no header row) for one entity kind
pub async fn ingest_csv<T: Entity>(store: &EntityStore, content: &[u8]) -> Result<usize> {
    let records = decode_csv(content)?;
    validate_batch_size(records.len())?;
    let rows = coerce_records::<T>(&records)?;

    let inserted = store.insert_batch(&rows).await?;
    info!(kind = %T::KIND, rows = inserted, "Ingested CSV batch");
    Ok(inserted)
}

/// Ingest an already-typed batch
pub async fn ingest_rows<T: Entity>(store: &EntityStore, rows: &[T]) -> Result<usize> {
    validate_batch_size(rows.len())?;
    validate_rows(rows)?;

    let inserted = store.insert_batch(rows).await?;
    info!(kind = %T::KIND, rows = inserted, "Ingested JSON batch");
    Ok(inserted)
}

/// Check every record's width, then coerce each into a typed row.
///
/// Widths are checked for the whole batch first so a malformed row is
/// reported as a column fault even when an earlier row has a bad value.
pub fn coerce_records<T: Entity>(records: &[Record]) -> Result<Vec<T>> {
    let kind = T::KIND;
    let expected = kind.column_count();

    if let Some((idx, record)) = records
        .iter()
        .enumerate()
        .find(|(_, record)| record.len() != expected)
    {
        return Err(Error::ColumnCount {
            kind,
            expected,
            found: record.len(),
            row: idx + 1,
        });
    }

    let rows = records
        .iter()
        .enumerate()
        .map(|(idx, record)| T::from_record(record, idx + 1))
        .collect::<Result<Vec<T>>>()?;

    validate_rows(&rows)?;
    Ok(rows)
}

/// Apply each row's content rules, reporting the first failure by 1-based row
fn validate_rows<T: Entity>(rows: &[T]) -> Result<()> {
    rows.iter()
        .enumerate()
        .try_for_each(|(idx, row)| row.validate(idx + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Department, Employee, EntityKind, Job};
    use crate::store::tests::setup_test_store;

    fn departments_csv(count: usize) -> Vec<u8> {
        (1..=count)
            .map(|i| format!("{i},Department{i}"))
            .collect::<Vec<_>>()
            .join("\n")
            .into_bytes()
    }

    #[tokio::test]
    async fn test_ingest_departments_csv() {
        let (store, _tmp) = setup_test_store().await;
        let n = ingest_csv::<Department>(&store, b"1,Engineering\n2,Sales\n3,Marketing")
            .await
            .unwrap();
        assert_eq!(n, 3);
        assert_eq!(store.count(EntityKind::Department).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_ingest_jobs_and_employees_csv() {
        let (store, _tmp) = setup_test_store().await;
        let jobs = ingest_csv::<Job>(
            &store,
            b"1,Software Engineer\n2,Data Analyst\n3,Product Manager",
        )
        .await
        .unwrap();
        assert_eq!(jobs, 3);

        let employees = ingest_csv::<Employee>(
            &store,
            b"1,John Doe,2021-01-15T09:00:00,1,1\n2,Jane Smith,2021-02-20T10:30:00,2,2",
        )
        .await
        .unwrap();
        assert_eq!(employees, 2);

        let stored: Vec<Employee> = store.list().await.unwrap();
        assert_eq!(stored[1].name, "Jane Smith");
        assert_eq!(stored[1].datetime, "2021-02-20T10:30:00");
    }

    #[tokio::test]
    async fn test_batch_size_limits() {
        let (store, _tmp) = setup_test_store().await;

        let err = ingest_csv::<Department>(&store, b"").await.unwrap_err();
        assert!(matches!(err, Error::BatchSize { count: 0 }));

        let err = ingest_csv::<Department>(&store, &departments_csv(1001))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BatchSize { count: 1001 }));
        assert_eq!(store.count(EntityKind::Department).await.unwrap(), 0);

        let n = ingest_csv::<Department>(&store, &departments_csv(1000))
            .await
            .unwrap();
        assert_eq!(n, 1000);
    }

    #[tokio::test]
    async fn test_batch_size_limits_for_jobs_and_employees() {
        let (store, _tmp) = setup_test_store().await;

        let jobs: Vec<u8> = (1..=1001)
            .map(|i| format!("{i},Job{i}\n"))
            .collect::<String>()
            .into_bytes();
        let employees: Vec<u8> = (1..=1001)
            .map(|i| format!("{i},Employee {i},2021-03-01T09:00:00,1,1\n"))
            .collect::<String>()
            .into_bytes();

        for err in [
            ingest_csv::<Job>(&store, b"").await.unwrap_err(),
            ingest_csv::<Employee>(&store, b"\n\n").await.unwrap_err(),
        ] {
            assert!(matches!(err, Error::BatchSize { count: 0 }));
        }
        for err in [
            ingest_csv::<Job>(&store, &jobs).await.unwrap_err(),
            ingest_csv::<Employee>(&store, &employees).await.unwrap_err(),
        ] {
            assert!(matches!(err, Error::BatchSize { count: 1001 }));
        }

        let counts = store.table_counts().await.unwrap();
        assert_eq!(counts.jobs + counts.employees, 0);
    }

    #[tokio::test]
    async fn test_wrong_column_count_persists_nothing() {
        let (store, _tmp) = setup_test_store().await;

        let err = ingest_csv::<Department>(&store, b"1,Engineering,Extra")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("2 columns"));

        let err = ingest_csv::<Job>(&store, b"1,Developer\n2\n3,Manager")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ColumnCount {
                expected: 2,
                found: 1,
                row: 2,
                ..
            }
        ));

        let err = ingest_csv::<Employee>(&store, b"1,John Doe,2021-01-15T09:00:00")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("5 columns"));

        let counts = store.table_counts().await.unwrap();
        assert_eq!(counts.departments + counts.jobs + counts.employees, 0);
    }

    #[tokio::test]
    async fn test_type_coercion_failure_persists_nothing() {
        let (store, _tmp) = setup_test_store().await;
        let err = ingest_csv::<Department>(&store, b"1,Engineering\ntwo,Sales")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::TypeCoercion { row: 2, .. }));
        assert!(err.is_client_error());
        assert_eq!(store.count(EntityKind::Department).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_collision_with_existing_row_is_atomic() {
        let (store, _tmp) = setup_test_store().await;
        ingest_csv::<Department>(&store, b"1,Engineering").await.unwrap();

        let err = ingest_csv::<Department>(&store, b"2,Sales\n1,Duplicate\n3,HR")
            .await
            .unwrap_err();
        assert!(!err.is_client_error());

        let stored: Vec<Department> = store.list().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].department, "Engineering");
    }

    #[tokio::test]
    async fn test_ingest_rows() {
        let (store, _tmp) = setup_test_store().await;
        let rows = vec![
            Job {
                id: 1,
                job: "Software Engineer".to_string(),
            },
            Job {
                id: 2,
                job: "Data Analyst".to_string(),
            },
        ];
        assert_eq!(ingest_rows(&store, &rows).await.unwrap(), 2);

        let empty: Vec<Job> = Vec::new();
        let err = ingest_rows(&store, &empty).await.unwrap_err();
        assert!(matches!(err, Error::BatchSize { count: 0 }));
    }

    #[tokio::test]
    async fn test_ingest_rows_rejects_blank_names() {
        let (store, _tmp) = setup_test_store().await;
        let rows = vec![
            Department {
                id: 1,
                department: "Engineering".to_string(),
            },
            Department {
                id: 2,
                department: String::new(),
            },
        ];
        let err = ingest_rows(&store, &rows).await.unwrap_err();
        assert!(matches!(
            err,
            Error::TypeCoercion {
                row: 2,
                column: "department",
                ..
            }
        ));
        assert_eq!(store.count(EntityKind::Department).await.unwrap(), 0);

        let jobs = vec![Job {
            id: 1,
            job: "   ".to_string(),
        }];
        assert!(ingest_rows(&store, &jobs).await.unwrap_err().is_client_error());
        assert_eq!(store.count(EntityKind::Job).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_blank_name_rejected_on_csv_path() {
        let (store, _tmp) = setup_test_store().await;
        let err = ingest_csv::<Department>(&store, b"1,Engineering\n2, ")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::TypeCoercion { row: 2, .. }));
        assert_eq!(store.count(EntityKind::Department).await.unwrap(), 0);
    }

    #[test]
    fn test_response_messages() {
        let resp = IngestResponse::uploaded::<Department>(3);
        assert_eq!(resp.message, "Successfully uploaded 3 departments");
        assert_eq!(resp.rows_inserted, 3);

        let resp = IngestResponse::inserted::<Employee>(1);
        assert_eq!(resp.message, "Successfully inserted 1 employees");
    }
}
