// ABOUTME: Row-to-entity conversion helpers shared by the staff and log repositories.
// ABOUTME: Employee rows go through the role classifier; unknown designations are integrity errors.

use ptlog_core::{Employee, EmployeeId, LogEntry, LogId, classify};
use rusqlite::{Connection, OptionalExtension, Params, Row};

use crate::error::{During, StoreError};

/// Raw columns of an `employees` row before classification.
pub(crate) struct EmployeeRow {
    pub id: i64,
    pub name: String,
    pub designation: String,
}

impl EmployeeRow {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            designation: row.get(2)?,
        })
    }

    /// Classify the stored designation into an `Employee`.
    pub(crate) fn into_employee(self) -> Result<Employee, StoreError> {
        let id = EmployeeId::new(self.id);
        classify(&self.designation, id, self.name).ok_or_else(|| {
            StoreError::Integrity(format!(
                "employee {id} has unknown designation '{}'",
                self.designation
            ))
        })
    }
}

pub(crate) fn row_to_log(row: &Row<'_>) -> rusqlite::Result<LogEntry> {
    Ok(LogEntry {
        id: LogId::new(row.get(0)?),
        employee_id: EmployeeId::new(row.get(1)?),
        details: row.get(2)?,
        logged_date: row.get(3)?,
    })
}

/// Point lookup on the staff table.
pub(crate) fn find_employee(
    conn: &Connection,
    id: EmployeeId,
    operation: &'static str,
) -> Result<Option<Employee>, StoreError> {
    conn.query_row(
        "SELECT emp_id, name, designation FROM employees WHERE emp_id = ?1",
        [id.get()],
        EmployeeRow::from_row,
    )
    .optional()
    .during(operation)?
    .map(EmployeeRow::into_employee)
    .transpose()
}

/// Run a log listing statement and collect the rows in statement order.
pub(crate) fn query_logs(
    conn: &Connection,
    sql: &str,
    params: impl Params,
    operation: &'static str,
) -> Result<Vec<LogEntry>, StoreError> {
    let mut stmt = conn.prepare(sql).during(operation)?;
    let rows = stmt.query_map(params, row_to_log).during(operation)?;

    let mut logs = Vec::new();
    for row in rows {
        logs.push(row.during(operation)?);
    }
    Ok(logs)
}
