// ABOUTME: Core library for ptlog, containing the staff directory and PT log domain types.
// ABOUTME: Defines entities, the role classifier, input validation rules, and business-rule outcomes.

pub mod classifier;
pub mod model;
pub mod outcome;
pub mod validation;

pub use classifier::classify;
pub use model::{DateRange, Employee, EmployeeId, LogEntry, LogId, Role, SupervisorLink};
pub use outcome::{Outcome, Rejection, Subject};
pub use validation::ValidationError;
