// ABOUTME: Storage failure type for ptlog-store, annotated with the operation being attempted.
// ABOUTME: Business-rule refusals are not errors here; they travel as Outcome::Rejected.

use thiserror::Error;

/// Errors raised by the storage session. These are the only failures that
/// cross the service boundary as `Err`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{operation} failed: {source}")]
    Sqlite {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("data integrity error: {0}")]
    Integrity(String),
}

impl StoreError {
    /// Name of the operation that failed, when known.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            StoreError::Sqlite { operation, .. } => Some(*operation),
            StoreError::Integrity(_) => None,
        }
    }
}

/// Attach the attempted operation to a raw rusqlite result.
pub(crate) trait During<T> {
    fn during(self, operation: &'static str) -> Result<T, StoreError>;
}

impl<T> During<T> for rusqlite::Result<T> {
    fn during(self, operation: &'static str) -> Result<T, StoreError> {
        self.map_err(|source| StoreError::Sqlite { operation, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_error_names_the_operation() {
        let result: rusqlite::Result<()> = Err(rusqlite::Error::QueryReturnedNoRows);
        let err = result.during("promote").unwrap_err();
        assert_eq!(err.operation(), Some("promote"));
        assert!(err.to_string().starts_with("promote failed:"));
    }

    #[test]
    fn integrity_error_has_no_operation() {
        let err = StoreError::Integrity("unknown designation 'Intern'".to_string());
        assert_eq!(err.operation(), None);
        assert!(err.to_string().contains("Intern"));
    }
}
