//! Staff directory operations: add, promote, assign supervisor, list.

use ptlog_core::validation::is_non_empty_name;
use ptlog_core::{Employee, EmployeeId, Outcome, Rejection, Role, Subject, SupervisorLink};
use rusqlite::params;

use crate::error::{During, StoreError};
use crate::helpers::EmployeeRow;
use crate::service::{DirectoryService, precondition, reject};

impl DirectoryService {
    /// Add a staff member. New staff always start as individual contributors.
    pub fn add_staff(&mut self, name: &str) -> Result<Outcome<EmployeeId>, StoreError> {
        const OP: &str = "add staff";
        if !is_non_empty_name(name) {
            return Ok(reject(OP, Rejection::InvalidName));
        }
        let name = name.trim();

        let conn = self.session().conn();
        conn.execute(
            "INSERT INTO employees (name, designation) VALUES (?1, ?2)",
            params![name, Role::IndividualContributor.as_tag()],
        )
        .during(OP)?;
        let id = EmployeeId::new(conn.last_insert_rowid());

        tracing::info!("added staff member {id} ({name})");
        Ok(Outcome::Completed(id))
    }

    /// Promote an individual contributor to manager. Promoting someone who
    /// is already a manager is refused, so the change never applies twice.
    pub fn promote(&mut self, id: EmployeeId) -> Result<Outcome<()>, StoreError> {
        const OP: &str = "promote";
        let tx = self.session_mut().begin(OP)?;

        if let Err(rejection) = precondition(
            &tx,
            id,
            Subject::Employee,
            Some(Role::IndividualContributor),
            OP,
        )? {
            return Ok(reject(OP, rejection));
        }

        tx.execute(
            "UPDATE employees SET designation = ?1 WHERE emp_id = ?2",
            params![Role::Manager.as_tag(), id.get()],
        )
        .during(OP)?;
        tx.commit().during(OP)?;

        tracing::info!("promoted {id} to manager");
        Ok(Outcome::Completed(()))
    }

    /// Record that `manager_id` supervises `employee_id`. The employee must be
    /// an individual contributor and the manager a manager. The employee is
    /// checked first, so when both ids are bad the employee's reason wins.
    pub fn assign_supervisor(
        &mut self,
        employee_id: EmployeeId,
        manager_id: EmployeeId,
    ) -> Result<Outcome<()>, StoreError> {
        const OP: &str = "assign supervisor";
        let tx = self.session_mut().begin(OP)?;

        if let Err(rejection) = precondition(
            &tx,
            employee_id,
            Subject::Employee,
            Some(Role::IndividualContributor),
            OP,
        )? {
            return Ok(reject(OP, rejection));
        }
        if let Err(rejection) =
            precondition(&tx, manager_id, Subject::Manager, Some(Role::Manager), OP)?
        {
            return Ok(reject(OP, rejection));
        }

        tx.execute(
            "INSERT INTO employee_managers (emp_id, mgr_id) VALUES (?1, ?2)",
            params![employee_id.get(), manager_id.get()],
        )
        .during(OP)?;
        tx.commit().during(OP)?;

        tracing::info!("assigned {employee_id} to manager {manager_id}");
        Ok(Outcome::Completed(()))
    }

    /// All staff in insertion order.
    pub fn list_staff(&self) -> Result<Vec<Employee>, StoreError> {
        const OP: &str = "list staff";
        let mut stmt = self
            .session()
            .conn()
            .prepare("SELECT emp_id, name, designation FROM employees ORDER BY emp_id ASC")
            .during(OP)?;
        let rows = stmt.query_map([], EmployeeRow::from_row).during(OP)?;

        let mut staff = Vec::new();
        for row in rows {
            staff.push(row.during(OP)?.into_employee()?);
        }
        Ok(staff)
    }

    /// Every recorded supervisor link, in the order they were assigned.
    /// Repeated assignments appear once per assignment.
    pub fn list_supervisor_links(&self) -> Result<Vec<SupervisorLink>, StoreError> {
        const OP: &str = "list supervisor links";
        let mut stmt = self
            .session()
            .conn()
            .prepare("SELECT emp_id, mgr_id FROM employee_managers ORDER BY rowid ASC")
            .during(OP)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(SupervisorLink {
                    employee_id: EmployeeId::new(row.get(0)?),
                    manager_id: EmployeeId::new(row.get(1)?),
                })
            })
            .during(OP)?;

        let mut links = Vec::new();
        for row in rows {
            links.push(row.during(OP)?);
        }
        Ok(links)
    }
}
