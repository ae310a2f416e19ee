// ABOUTME: Business-rule results for directory operations: a completed value or a described rejection.
// ABOUTME: Rejections are expected outcomes of a well-formed call, never hard errors.

use thiserror::Error;

use chrono::NaiveDate;

use crate::model::{EmployeeId, Role};

/// Which side of an operation an id was supplied for. Used in rejection text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Employee,
    Manager,
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subject::Employee => write!(f, "employee"),
            Subject::Manager => write!(f, "manager"),
        }
    }
}

/// Why a precondition check refused an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{subject} {id} not found")]
    NotFound { subject: Subject, id: EmployeeId },

    #[error("{subject} {id} is a {actual}, expected {expected}")]
    WrongRole {
        subject: Subject,
        id: EmployeeId,
        expected: Role,
        actual: Role,
    },

    #[error("staff name must not be empty")]
    InvalidName,

    #[error("date {0} is outside the years 0000 to 9999")]
    UnstorableDate(NaiveDate),
}

/// Result of a directory operation whose preconditions may refuse it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    Completed(T),
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Completed(_) => None,
            Outcome::Rejected(r) => Some(r),
        }
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(v) => Some(v),
            Outcome::Rejected(_) => None,
        }
    }

    pub fn into_result(self) -> Result<T, Rejection> {
        match self {
            Outcome::Completed(v) => Ok(v),
            Outcome::Rejected(r) => Err(r),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Completed(v) => Outcome::Completed(f(v)),
            Outcome::Rejected(r) => Outcome::Rejected(r),
        }
    }
}

impl<T> From<Result<T, Rejection>> for Outcome<T> {
    fn from(result: Result<T, Rejection>) -> Self {
        match result {
            Ok(v) => Outcome::Completed(v),
            Err(r) => Outcome::Rejected(r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_reasons_are_specific() {
        let nf = Rejection::NotFound {
            subject: Subject::Manager,
            id: EmployeeId::new(12),
        };
        assert_eq!(nf.to_string(), "manager 12 not found");

        let wr = Rejection::WrongRole {
            subject: Subject::Employee,
            id: EmployeeId::new(3),
            expected: Role::IndividualContributor,
            actual: Role::Manager,
        };
        assert_eq!(
            wr.to_string(),
            "employee 3 is a Manager, expected Team Member"
        );

        let far = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
        assert_eq!(
            Rejection::UnstorableDate(far).to_string(),
            "date +10000-01-01 is outside the years 0000 to 9999"
        );
    }

    #[test]
    fn outcome_accessors() {
        let done: Outcome<u32> = Outcome::Completed(7);
        assert!(done.is_completed());
        assert!(done.rejection().is_none());
        assert_eq!(done.clone().map(|v| v * 2).completed(), Some(14));
        assert_eq!(done.into_result(), Ok(7));

        let refused: Outcome<u32> = Err(Rejection::InvalidName).into();
        assert!(!refused.is_completed());
        assert_eq!(refused.rejection(), Some(&Rejection::InvalidName));
        assert_eq!(refused.completed(), None);
    }
}
