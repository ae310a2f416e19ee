// ABOUTME: Defines the staff directory and PT log record shapes: Employee, LogEntry, SupervisorLink.
// ABOUTME: Roles are a tagged enum on a single Employee struct; DateRange enforces start <= end.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError};

/// Storage-assigned identifier of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(i64);

impl EmployeeId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw integer as stored in the `emp_id` column.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmployeeId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validation::parse_id(s).map(Self)
    }
}

/// Storage-assigned identifier of a PT log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogId(i64);

impl LogId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role a staff member holds. Every staff member starts as an
/// individual contributor; promotion to manager is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    IndividualContributor,
    Manager,
}

impl Role {
    /// The tag written to the `designation` column.
    pub const fn as_tag(self) -> &'static str {
        match self {
            Role::IndividualContributor => "TeamMember",
            Role::Manager => "Manager",
        }
    }

    /// Human-readable label used in listings and rejection messages.
    pub const fn label(self) -> &'static str {
        match self {
            Role::IndividualContributor => "Team Member",
            Role::Manager => "Manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A staff directory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub role: Role,
}

impl Employee {
    pub fn new(id: EmployeeId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
        }
    }

    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.role {
            Role::IndividualContributor => "TeamMember",
            Role::Manager => "Manager",
        };
        write!(
            f,
            "{kind}{{id={}, name={}, designation={}}}",
            self.id, self.name, self.role
        )
    }
}

/// A dated free-text PT record attributed to one staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: LogId,
    pub employee_id: EmployeeId,
    pub details: String,
    pub logged_date: NaiveDate,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PTLog{{id={}, employeeId={}, details={}, loggedDate={}}}",
            self.id,
            self.employee_id,
            self.details,
            self.logged_date.format(validation::DATE_FORMAT)
        )
    }
}

/// Records that `manager_id` oversees `employee_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisorLink {
    pub employee_id: EmployeeId,
    pub manager_id: EmployeeId,
}

/// An inclusive calendar date range. Construction guarantees `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting one whose start falls after its end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedRange {
                start: start.format(validation::DATE_FORMAT).to_string(),
                end: end.format(validation::DATE_FORMAT).to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// A range covering a single day.
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// True when `date` lies within the range, both ends included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..={}",
            self.start.format(validation::DATE_FORMAT),
            self.end.format(validation::DATE_FORMAT)
        )
    }
}
