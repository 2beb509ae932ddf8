//! SQLite schema definition

/// SQL schema for the HR tables.
///
/// `department_id` and `job_id` are plain integers: references are not
/// enforced, and reports decide how unmatched ids are treated.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS departments (
    id INTEGER PRIMARY KEY,
    department TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS jobs (
    id INTEGER PRIMARY KEY,
    job TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    datetime TEXT NOT NULL,
    department_id INTEGER NOT NULL,
    job_id INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_employees_department ON employees(department_id);
CREATE INDEX IF NOT EXISTS idx_employees_job ON employees(job_id);
"#;
