//! SQL text for the hiring reports
//!
//! Both statements take the hiring year as their only parameter. Year and
//! month come from fixed character positions of the stored `datetime` text
//! (`YYYY-MM-...`); the value is never parsed as a date.

/// Hires per (department, job) bucketed by quarter.
///
/// Inner joins drop employees whose department or job id has no match.
/// Rows whose month is outside 01..12 belong to no quarter and are skipped.
pub const HIRED_BY_QUARTER_SQL: &str = r#"
SELECT
    d.department AS department,
    j.job AS job,
    SUM(CASE WHEN CAST(substr(e.datetime, 6, 2) AS INTEGER) BETWEEN 1 AND 3 THEN 1 ELSE 0 END) AS q1,
    SUM(CASE WHEN CAST(substr(e.datetime, 6, 2) AS INTEGER) BETWEEN 4 AND 6 THEN 1 ELSE 0 END) AS q2,
    SUM(CASE WHEN CAST(substr(e.datetime, 6, 2) AS INTEGER) BETWEEN 7 AND 9 THEN 1 ELSE 0 END) AS q3,
    SUM(CASE WHEN CAST(substr(e.datetime, 6, 2) AS INTEGER) BETWEEN 10 AND 12 THEN 1 ELSE 0 END) AS q4
FROM employees e
JOIN departments d ON d.id = e.department_id
JOIN jobs j ON j.id = e.job_id
WHERE substr(e.datetime, 1, 4) = ?
    AND CAST(substr(e.datetime, 6, 2) AS INTEGER) BETWEEN 1 AND 12
GROUP BY d.department, j.job
ORDER BY d.department ASC, j.job ASC
"#;

/// Departments whose hires in the year exceed the mean over all departments.
///
/// The left join keeps departments with no hires at zero so they still count
/// toward the mean. With no departments AVG is NULL and nothing matches.
pub const DEPARTMENTS_ABOVE_AVERAGE_SQL: &str = r#"
WITH hires AS (
    SELECT
        d.id AS id,
        d.department AS department,
        COUNT(e.id) AS hired
    FROM departments d
    LEFT JOIN employees e
        ON e.department_id = d.id
        AND substr(e.datetime, 1, 4) = ?
    GROUP BY d.id, d.department
)
SELECT id, department, hired
FROM hires
WHERE hired > (SELECT AVG(hired) FROM hires)
ORDER BY hired DESC, id ASC
"#;
