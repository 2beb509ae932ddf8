//! Status command implementation

use crate::config::Config;
use crate::error::Result;
use crate::store::{EntityStore, TableCounts};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Status information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusInfo {
    pub config_path: String,
    pub db_path: String,
    pub bind_addr: String,
    pub schema_initialized: bool,
    pub counts: TableCounts,
}

/// Get system status
pub async fn cmd_status(config: &Config, store: &EntityStore) -> Result<StatusInfo> {
    info!("Getting status");

    let schema_initialized = store.is_initialized().await?;
    let counts = if schema_initialized {
        store.table_counts().await?
    } else {
        TableCounts::default()
    };

    Ok(StatusInfo {
        config_path: config.paths.config_file.display().to_string(),
        db_path: config.paths.db_file.display().to_string(),
        bind_addr: config.server.bind_addr.clone(),
        schema_initialized,
        counts,
    })
}

/// Print status to console
pub fn print_status(status: &StatusInfo) {
    println!("\n📊 hrmigrate Status\n");
    println!("Configuration: {}", status.config_path);
    println!("Database: {}", status.db_path);
    println!("Bind address: {}", status.bind_addr);

    if !status.schema_initialized {
        println!("\n⚠ Schema not created - run 'hrmigrate init' or 'hrmigrate serve'");
        return;
    }

    println!("\nRows:");
    println!("  Departments: {}", status.counts.departments);
    println!("  Jobs: {}", status.counts.jobs);
    println!("  Employees: {}", status.counts.employees);
}
