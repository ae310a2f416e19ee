// ABOUTME: Directory & log access service: owns the session and runs each operation as check-then-act.
// ABOUTME: Holds the reusable precondition check that turns ids into existence- and role-verified staff.

use std::path::Path;

use ptlog_core::{Employee, EmployeeId, Outcome, Rejection, Role, Subject};
use rusqlite::Connection;

use crate::error::StoreError;
use crate::helpers::find_employee;
use crate::session::Session;

/// Role-checked access to the staff directory and the PT log.
///
/// Every operation that names an id follows the same protocol:
/// 1. Begin a transaction
/// 2. Point-lookup the id; refuse with `NotFound` or `WrongRole`
/// 3. Run the mutating or read statement
/// 4. Commit
///
/// Because both phases share one transaction, a precondition verified in
/// step 2 still holds in step 3. Operation methods live in `repos/`.
#[derive(Debug)]
pub struct DirectoryService {
    session: Session,
}

impl DirectoryService {
    /// Wrap an already-open session. The service owns it until `close`.
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Open a file-backed session and wrap it.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self::new(Session::open(path)?))
    }

    /// Open an in-memory session and wrap it.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self::new(Session::open_in_memory()?))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Release the underlying session.
    pub fn close(self) -> Result<(), StoreError> {
        self.session.close()
    }

    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Look up a staff member by id without any role requirement.
    pub fn find_employee(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        find_employee(self.session.conn(), id, "find employee")
    }
}

/// The existence-plus-role check run before every id-scoped statement.
///
/// Returns the stored employee when `id` exists and, if `required` is set,
/// holds that role. Expected refusals come back as the inner `Err`; only
/// storage failures use the outer one.
pub(crate) fn precondition(
    conn: &Connection,
    id: EmployeeId,
    subject: Subject,
    required: Option<Role>,
    operation: &'static str,
) -> Result<Result<Employee, Rejection>, StoreError> {
    let Some(employee) = find_employee(conn, id, operation)? else {
        return Ok(Err(Rejection::NotFound { subject, id }));
    };

    if let Some(expected) = required {
        if employee.role != expected {
            return Ok(Err(Rejection::WrongRole {
                subject,
                id,
                expected,
                actual: employee.role,
            }));
        }
    }

    tracing::debug!("{operation}: precondition passed for {subject} {id}");
    Ok(Ok(employee))
}

/// Log the reason for a refused operation and package it as an outcome.
pub(crate) fn reject<T>(operation: &'static str, rejection: Rejection) -> Outcome<T> {
    tracing::warn!("{operation} refused: {rejection}");
    Outcome::Rejected(rejection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> DirectoryService {
        let svc = DirectoryService::open_in_memory().unwrap();
        svc.session()
            .conn()
            .execute_batch(
                "INSERT INTO employees (name, designation) VALUES ('Ivy', 'TeamMember');
                 INSERT INTO employees (name, designation) VALUES ('Max', 'Manager');
                 INSERT INTO employees (name, designation) VALUES ('Odd', 'Intern');",
            )
            .unwrap();
        svc
    }

    #[test]
    fn precondition_reports_missing_id() {
        let svc = seeded();
        let result = precondition(
            svc.session().conn(),
            EmployeeId::new(99),
            Subject::Manager,
            None,
            "test",
        )
        .unwrap();
        assert_eq!(
            result,
            Err(Rejection::NotFound {
                subject: Subject::Manager,
                id: EmployeeId::new(99)
            })
        );
    }

    #[test]
    fn precondition_checks_role_only_when_required() {
        let svc = seeded();
        let conn = svc.session().conn();

        let any = precondition(conn, EmployeeId::new(2), Subject::Employee, None, "test")
            .unwrap()
            .unwrap();
        assert_eq!(any.name, "Max");

        let wrong = precondition(
            conn,
            EmployeeId::new(2),
            Subject::Employee,
            Some(Role::IndividualContributor),
            "test",
        )
        .unwrap();
        assert_eq!(
            wrong,
            Err(Rejection::WrongRole {
                subject: Subject::Employee,
                id: EmployeeId::new(2),
                expected: Role::IndividualContributor,
                actual: Role::Manager,
            })
        );

        let right = precondition(
            conn,
            EmployeeId::new(1),
            Subject::Employee,
            Some(Role::IndividualContributor),
            "test",
        )
        .unwrap();
        assert!(right.is_ok());
    }

    #[test]
    fn unknown_designation_is_an_integrity_error() {
        let svc = seeded();
        let err = precondition(
            svc.session().conn(),
            EmployeeId::new(3),
            Subject::Employee,
            None,
            "test",
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::Integrity(_)));
    }

    #[test]
    fn find_employee_returns_none_for_absent_id() {
        let svc = seeded();
        assert!(svc.find_employee(EmployeeId::new(42)).unwrap().is_none());
        let ivy = svc.find_employee(EmployeeId::new(1)).unwrap().unwrap();
        assert_eq!(ivy.role, Role::IndividualContributor);
    }
}
