//! PT log operations: add, list by employee or manager (optionally
//! date-bounded), and delete within a range.
//!
//! The single-employee full listing is ascending by logged date; every range-
//! or manager-scoped listing is descending. Ties break on log id in the same
//! direction, so the descending views are exact reversals.

use chrono::{Datelike, NaiveDate};
use ptlog_core::validation::{DATE_FORMAT, MAX_STORED_YEAR, MIN_STORED_YEAR, is_storable_date};
use ptlog_core::{DateRange, EmployeeId, LogEntry, LogId, Outcome, Rejection, Role, Subject};
use rusqlite::params;

use crate::error::{During, StoreError};
use crate::helpers::query_logs;
use crate::service::{DirectoryService, precondition, reject};

const LOG_COLUMNS: &str = "p.ptlog_id, p.emp_id, p.details, p.logged_date";

/// Range bounds as stored text, clipped to the storable years. `None` when
/// the range holds no storable date at all.
fn stored_bounds(range: DateRange) -> Option<(String, String)> {
    if range.end().year() < MIN_STORED_YEAR || range.start().year() > MAX_STORED_YEAR {
        return None;
    }
    let start = if is_storable_date(range.start()) {
        range.start().format(DATE_FORMAT).to_string()
    } else {
        format!("{MIN_STORED_YEAR:04}-01-01")
    };
    let end = if is_storable_date(range.end()) {
        range.end().format(DATE_FORMAT).to_string()
    } else {
        format!("{MAX_STORED_YEAR:04}-12-31")
    };
    Some((start, end))
}

impl DirectoryService {
    /// Record a PT log entry against an existing staff member of any role.
    pub fn add_log_entry(
        &mut self,
        employee_id: EmployeeId,
        details: &str,
        logged_date: NaiveDate,
    ) -> Result<Outcome<LogId>, StoreError> {
        const OP: &str = "add log entry";
        if !is_storable_date(logged_date) {
            return Ok(reject(OP, Rejection::UnstorableDate(logged_date)));
        }
        let tx = self.session_mut().begin(OP)?;

        if let Err(rejection) = precondition(&tx, employee_id, Subject::Employee, None, OP)? {
            return Ok(reject(OP, rejection));
        }

        tx.execute(
            "INSERT INTO ptlogs (emp_id, details, logged_date) VALUES (?1, ?2, ?3)",
            params![employee_id.get(), details, logged_date],
        )
        .during(OP)?;
        let id = LogId::new(tx.last_insert_rowid());
        tx.commit().during(OP)?;

        tracing::info!("added log {id} for {employee_id} on {logged_date}");
        Ok(Outcome::Completed(id))
    }

    /// All logs of one staff member, oldest first.
    pub fn list_logs_of_employee(
        &mut self,
        employee_id: EmployeeId,
    ) -> Result<Outcome<Vec<LogEntry>>, StoreError> {
        const OP: &str = "list logs of employee";
        let tx = self.session_mut().begin(OP)?;

        if let Err(rejection) = precondition(&tx, employee_id, Subject::Employee, None, OP)? {
            return Ok(reject(OP, rejection));
        }

        let sql = format!(
            "SELECT {LOG_COLUMNS} FROM ptlogs AS p
             WHERE p.emp_id = ?1
             ORDER BY p.logged_date ASC, p.ptlog_id ASC"
        );
        let logs = query_logs(&tx, &sql, params![employee_id.get()], OP)?;
        tx.commit().during(OP)?;
        Ok(Outcome::Completed(logs))
    }

    /// Logs of one staff member dated within `range`, newest first.
    pub fn list_logs_of_employee_in_range(
        &mut self,
        employee_id: EmployeeId,
        range: DateRange,
    ) -> Result<Outcome<Vec<LogEntry>>, StoreError> {
        const OP: &str = "list logs of employee in range";
        let tx = self.session_mut().begin(OP)?;

        if let Err(rejection) = precondition(&tx, employee_id, Subject::Employee, None, OP)? {
            return Ok(reject(OP, rejection));
        }
        let Some((start, end)) = stored_bounds(range) else {
            return Ok(Outcome::Completed(Vec::new()));
        };

        let sql = format!(
            "SELECT {LOG_COLUMNS} FROM ptlogs AS p
             WHERE p.emp_id = ?1 AND p.logged_date >= ?2 AND p.logged_date <= ?3
             ORDER BY p.logged_date DESC, p.ptlog_id DESC"
        );
        let logs = query_logs(
            &tx,
            &sql,
            params![employee_id.get(), start, end],
            OP,
        )?;
        tx.commit().during(OP)?;
        Ok(Outcome::Completed(logs))
    }

    /// Logs of every staff member linked under `manager_id`, newest first.
    pub fn list_logs_under_manager(
        &mut self,
        manager_id: EmployeeId,
    ) -> Result<Outcome<Vec<LogEntry>>, StoreError> {
        const OP: &str = "list logs under manager";
        let tx = self.session_mut().begin(OP)?;

        if let Err(rejection) =
            precondition(&tx, manager_id, Subject::Manager, Some(Role::Manager), OP)?
        {
            return Ok(reject(OP, rejection));
        }

        // IN keeps each log once even if a link was recorded twice
        let sql = format!(
            "SELECT {LOG_COLUMNS} FROM ptlogs AS p
             WHERE p.emp_id IN (SELECT em.emp_id FROM employee_managers AS em WHERE em.mgr_id = ?1)
             ORDER BY p.logged_date DESC, p.ptlog_id DESC"
        );
        let logs = query_logs(&tx, &sql, params![manager_id.get()], OP)?;
        tx.commit().during(OP)?;
        Ok(Outcome::Completed(logs))
    }

    /// Logs of every staff member linked under `manager_id` dated within
    /// `range`, newest first.
    pub fn list_logs_under_manager_in_range(
        &mut self,
        manager_id: EmployeeId,
        range: DateRange,
    ) -> Result<Outcome<Vec<LogEntry>>, StoreError> {
        const OP: &str = "list logs under manager in range";
        let tx = self.session_mut().begin(OP)?;

        if let Err(rejection) =
            precondition(&tx, manager_id, Subject::Manager, Some(Role::Manager), OP)?
        {
            return Ok(reject(OP, rejection));
        }
        let Some((start, end)) = stored_bounds(range) else {
            return Ok(Outcome::Completed(Vec::new()));
        };

        let sql = format!(
            "SELECT {LOG_COLUMNS} FROM ptlogs AS p
             WHERE p.emp_id IN (SELECT em.emp_id FROM employee_managers AS em WHERE em.mgr_id = ?1)
               AND p.logged_date >= ?2 AND p.logged_date <= ?3
             ORDER BY p.logged_date DESC, p.ptlog_id DESC"
        );
        let logs = query_logs(
            &tx,
            &sql,
            params![manager_id.get(), start, end],
            OP,
        )?;
        tx.commit().during(OP)?;
        Ok(Outcome::Completed(logs))
    }

    /// Delete every log of `employee_id` dated within `range` and return how
    /// many rows went. No existence check: an absent id deletes nothing and
    /// still completes.
    pub fn delete_logs_of_employee_in_range(
        &mut self,
        employee_id: EmployeeId,
        range: DateRange,
    ) -> Result<Outcome<usize>, StoreError> {
        const OP: &str = "delete logs of employee in range";
        let Some((start, end)) = stored_bounds(range) else {
            tracing::info!("deleted 0 log(s) of {employee_id} in {range}");
            return Ok(Outcome::Completed(0));
        };
        let removed = self
            .session()
            .conn()
            .execute(
                "DELETE FROM ptlogs WHERE emp_id = ?1 AND logged_date >= ?2 AND logged_date <= ?3",
                params![employee_id.get(), start, end],
            )
            .during(OP)?;

        tracing::info!("deleted {removed} log(s) of {employee_id} in {range}");
        Ok(Outcome::Completed(removed))
    }
}
