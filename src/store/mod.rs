//! Entity storage using SQLite
//!
//! This module owns every persisted row:
//! - Departments
//! - Jobs
//! - Employees
//!
//! Rows are only ever appended. Each batch is written inside one transaction
//! that is committed explicitly; dropping it uncommitted rolls it back.

mod schema;

pub use schema::*;

use crate::config::Config;
use crate::error::Result;
use crate::models::{Entity, EntityKind};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::{debug, info};

/// Entity store handle
#[derive(Clone)]
pub struct EntityStore {
    pool: SqlitePool,
}

impl EntityStore {
    /// Connect to the database named by the config
    pub async fn connect(config: &Config) -> Result<Self> {
        Self::open(&config.paths.db_file, config.database.max_connections).await
    }

    /// Connect to a database file, creating it if needed
    pub async fn open(db_path: &Path, max_connections: u32) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(false)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        debug!("Connecting to SQLite database at {:?}", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Create the tables. Safe to run against an existing database.
    pub async fn init_schema(&self) -> Result<()> {
        info!("Initializing database schema");
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Check if the schema has been created
    pub async fn is_initialized(&self) -> Result<bool> {
        let result: Option<(i32,)> = sqlx::query_as(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='employees'",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(result.is_some())
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert all rows in one transaction and return how many were written.
    ///
    /// Any failure, including a primary key collision, leaves the table as it
    /// was before the call.
    pub async fn insert_batch<T: Entity>(&self, rows: &[T]) -> Result<usize> {
        let sql = insert_sql(T::KIND);
        let mut tx = self.pool.begin().await?;

        for row in rows {
            row.bind_values(sqlx::query(&sql)).execute(&mut *tx).await?;
        }

        tx.commit().await?;
        debug!(kind = %T::KIND, rows = rows.len(), "Committed batch");
        Ok(rows.len())
    }

    /// All rows of one kind, ordered by id
    pub async fn list<T: Entity>(&self) -> Result<Vec<T>> {
        let kind = T::KIND;
        let sql = format!(
            "SELECT {} FROM {} ORDER BY id",
            kind.columns().join(", "),
            kind.plural()
        );
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Number of stored rows of one kind
    pub async fn count(&self, kind: EntityKind) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", kind.plural());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// Row counts for every table
    pub async fn table_counts(&self) -> Result<TableCounts> {
        Ok(TableCounts {
            departments: self.count(EntityKind::Department).await?,
            jobs: self.count(EntityKind::Job).await?,
            employees: self.count(EntityKind::Employee).await?,
        })
    }
}

/// Row counts per table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCounts {
    pub departments: i64,
    pub jobs: i64,
    pub employees: i64,
}

fn insert_sql(kind: EntityKind) -> String {
    let columns = kind.columns();
    let placeholders = columns.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        kind.plural(),
        columns.join(", "),
        placeholders
    )
}
