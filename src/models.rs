//! Entity kinds and their typed rows.
//!
//! Each kind knows its table, its column list, and how to coerce one decoded
//! CSV record into a typed row. The ingestion pipeline is generic over
//! [`Entity`], so the three kinds share one validate-coerce-insert path.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite};
use std::str::FromStr;

/// The three record kinds the service ingests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Department,
    Job,
    Employee,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Department,
        EntityKind::Job,
        EntityKind::Employee,
    ];

    /// Table name, also the JSON batch field name
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Department => "departments",
            EntityKind::Job => "jobs",
            EntityKind::Employee => "employees",
        }
    }

    pub fn title_plural(&self) -> &'static str {
        match self {
            EntityKind::Department => "Departments",
            EntityKind::Job => "Jobs",
            EntityKind::Employee => "Employees",
        }
    }

    /// Column names in CSV order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Department => &["id", "department"],
            EntityKind::Job => &["id", "job"],
            EntityKind::Employee => &["id", "name", "datetime", "department_id", "job_id"],
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns().len()
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Department => write!(f, "department"),
            EntityKind::Job => write!(f, "job"),
            EntityKind::Employee => write!(f, "employee"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "department" | "departments" => Ok(EntityKind::Department),
            "job" | "jobs" => Ok(EntityKind::Job),
            "employee" | "employees" => Ok(EntityKind::Employee),
            _ => Err(Error::UnknownKind(s.to_string())),
        }
    }
}

/// A row type that can be decoded from CSV and inserted into its table.
pub trait Entity:
    Serialize + DeserializeOwned + for<'r> FromRow<'r, SqliteRow> + Send + Sync + Unpin + 'static
{
    const KIND: EntityKind;

    /// Coerce one record of exactly `KIND.column_count()` fields.
    /// `row` is the 1-based position used in error messages.
    fn from_record(record: &[String], row: usize) -> Result<Self>;

    /// Content rules a typed row must satisfy, however it arrived.
    fn validate(&self, _row: usize) -> Result<()> {
        Ok(())
    }

    /// Bind this row's values in column order.
    fn bind_values<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>>;
}

/// A department
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub department: String,
}

/// A job title
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub job: String,
}

/// A hired employee. `datetime` is kept as submitted.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub datetime: String,
    pub department_id: i64,
    pub job_id: i64,
}

impl Entity for Department {
    const KIND: EntityKind = EntityKind::Department;

    fn from_record(record: &[String], row: usize) -> Result<Self> {
        Ok(Self {
            id: int_field(record, 0, "id", row)?,
            department: text_field(record, 1),
        })
    }

    fn validate(&self, row: usize) -> Result<()> {
        require_non_empty(&self.department, "department", row)
    }

    fn bind_values<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query.bind(self.id).bind(&self.department)
    }
}

impl Entity for Job {
    const KIND: EntityKind = EntityKind::Job;

    fn from_record(record: &[String], row: usize) -> Result<Self> {
        Ok(Self {
            id: int_field(record, 0, "id", row)?,
            job: text_field(record, 1),
        })
    }

    fn validate(&self, row: usize) -> Result<()> {
        require_non_empty(&self.job, "job", row)
    }

    fn bind_values<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query.bind(self.id).bind(&self.job)
    }
}

impl Entity for Employee {
    const KIND: EntityKind = EntityKind::Employee;

    fn from_record(record: &[String], row: usize) -> Result<Self> {
        Ok(Self {
            id: int_field(record, 0, "id", row)?,
            name: text_field(record, 1),
            datetime: text_field(record, 2),
            department_id: int_field(record, 3, "department_id", row)?,
            job_id: int_field(record, 4, "job_id", row)?,
        })
    }

    fn bind_values<'q>(
        &'q self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        query
            .bind(self.id)
            .bind(&self.name)
            .bind(&self.datetime)
            .bind(self.department_id)
            .bind(self.job_id)
    }
}

fn raw_field(record: &[String], idx: usize) -> &str {
    record.get(idx).map(String::as_str).unwrap_or_default()
}

fn text_field(record: &[String], idx: usize) -> String {
    raw_field(record, idx).to_string()
}

fn require_non_empty(value: &str, column: &'static str, row: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::TypeCoercion {
            row,
            column,
            value: value.to_string(),
            expected: "non-empty text",
        });
    }
    Ok(())
}

fn int_field(record: &[String], idx: usize, column: &'static str, row: usize) -> Result<i64> {
    let value = raw_field(record, idx);
    value.trim().parse::<i64>().map_err(|_| Error::TypeCoercion {
        row,
        column,
        value: value.to_string(),
        expected: "an integer",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_kind_columns() {
        assert_eq!(EntityKind::Department.column_count(), 2);
        assert_eq!(EntityKind::Job.column_count(), 2);
        assert_eq!(EntityKind::Employee.column_count(), 5);
        assert_eq!(EntityKind::Job.plural(), "jobs");
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Employees".parse::<EntityKind>().unwrap(), EntityKind::Employee);
        assert_eq!("job".parse::<EntityKind>().unwrap(), EntityKind::Job);
        assert!(matches!(
            "manager".parse::<EntityKind>(),
            Err(Error::UnknownKind(kind)) if kind == "manager"
        ));
    }

    #[test]
    fn test_employee_from_record() {
        let emp = Employee::from_record(
            &record(&["7", "Jane Smith", "2021-02-20T10:30:00", " 2", "3 "]),
            1,
        )
        .unwrap();
        assert_eq!(emp.id, 7);
        assert_eq!(emp.datetime, "2021-02-20T10:30:00");
        assert_eq!(emp.department_id, 2);
        assert_eq!(emp.job_id, 3);
    }

    #[test]
    fn test_non_integer_identifies_row_and_value() {
        let err = Employee::from_record(&record(&["1", "Bob", "2021-01-01T00:00:00", "x", "1"]), 4)
            .unwrap_err();
        match err {
            Error::TypeCoercion {
                row, column, value, ..
            } => {
                assert_eq!(row, 4);
                assert_eq!(column, "department_id");
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_department_name_required() {
        let dept = Department::from_record(&record(&["1", "  "]), 3).unwrap();
        let err = dept.validate(3).unwrap_err();
        assert!(matches!(err, Error::TypeCoercion { column: "department", row: 3, .. }));
    }

    #[test]
    fn test_job_name_required() {
        let job = Job {
            id: 1,
            job: String::new(),
        };
        assert!(matches!(
            job.validate(1),
            Err(Error::TypeCoercion { column: "job", .. })
        ));
        assert!(Job {
            id: 1,
            job: "Developer".to_string()
        }
        .validate(1)
        .is_ok());
    }

    #[test]
    fn test_employee_text_is_not_checked() {
        let emp = Employee::from_record(&record(&["1", "", "", "1", "1"]), 1).unwrap();
        assert!(emp.validate(1).is_ok());
    }
}
