//! Report command implementation

use crate::error::Result;
use crate::report::{departments_above_average, hired_by_quarter, DepartmentHires, QuarterlyHires};
use crate::store::EntityStore;
use clap::ValueEnum;
use serde::Serialize;
use tracing::info;

/// Available reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Hires per department and job in each quarter of 2021
    HiredByQuarter,
    /// Departments that hired more than the 2021 mean
    DepartmentsAboveAverage,
}

/// Report rows, serialized as a bare JSON array
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReportOutput {
    HiredByQuarter(Vec<QuarterlyHires>),
    DepartmentsAboveAverage(Vec<DepartmentHires>),
}

/// Run a report
pub async fn cmd_report(store: &EntityStore, kind: ReportKind) -> Result<ReportOutput> {
    info!("Running report {:?}", kind);

    Ok(match kind {
        ReportKind::HiredByQuarter => ReportOutput::HiredByQuarter(hired_by_quarter(store).await?),
        ReportKind::DepartmentsAboveAverage => {
            ReportOutput::DepartmentsAboveAverage(departments_above_average(store).await?)
        }
    })
}

/// Print a report as a table
pub fn print_report(output: &ReportOutput) {
    match output {
        ReportOutput::HiredByQuarter(rows) => {
            println!("\n📈 Hires by quarter (2021)\n");
            if rows.is_empty() {
                println!("No hires recorded for 2021.");
                return;
            }
            println!(
                "{:<24} {:<24} {:>4} {:>4} {:>4} {:>4}",
                "Department", "Job", "Q1", "Q2", "Q3", "Q4"
            );
            for row in rows {
                println!(
                    "{:<24} {:<24} {:>4} {:>4} {:>4} {:>4}",
                    row.department, row.job, row.q1, row.q2, row.q3, row.q4
                );
            }
        }
        ReportOutput::DepartmentsAboveAverage(rows) => {
            println!("\n🏢 Departments above the 2021 hiring mean\n");
            if rows.is_empty() {
                println!("No department hired above the mean.");
                return;
            }
            println!("{:>6} {:<24} {:>6}", "ID", "Department", "Hired");
            for row in rows {
                println!("{:>6} {:<24} {:>6}", row.id, row.department, row.hired);
            }
        }
    }
}
