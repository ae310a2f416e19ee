// ABOUTME: Connected SQLite session that executes the parameterized statements of the directory service.
// ABOUTME: Opening provisions the tables; the connection is released on close() or when dropped.

use std::path::Path;

use rusqlite::{Connection, Transaction};

use crate::error::{During, StoreError};

/// Tables used by the directory service. Referential and role integrity are
/// enforced by the service, so no foreign keys are declared.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS employees (
        emp_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        designation TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS ptlogs (
        ptlog_id INTEGER PRIMARY KEY AUTOINCREMENT,
        emp_id INTEGER NOT NULL,
        details TEXT NOT NULL,
        logged_date TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS employee_managers (
        emp_id INTEGER NOT NULL,
        mgr_id INTEGER NOT NULL
    );

    CREATE INDEX IF NOT EXISTS ptlogs_by_employee ON ptlogs (emp_id, logged_date);
    CREATE INDEX IF NOT EXISTS employee_managers_by_manager ON employee_managers (mgr_id);";

/// A single connected handle to the backing store. Owned by one
/// `DirectoryService` at a time; there is no process-wide singleton.
#[derive(Debug)]
pub struct Session {
    conn: Connection,
}

impl Session {
    /// Open or create a database file at the given path and make sure the
    /// tables exist.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).during("open session")?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .during("open session")?;
        tracing::debug!("opened session at {}", path.display());
        Self::provision(conn)
    }

    /// Open an ephemeral in-memory store. Contents vanish when the session closes.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().during("open session")?;
        tracing::debug!("opened in-memory session");
        Self::provision(conn)
    }

    fn provision(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA).during("provision schema")?;
        Ok(Self { conn })
    }

    /// Version string reported by the storage engine.
    pub fn version(&self) -> Result<String, StoreError> {
        self.conn
            .query_row("SELECT sqlite_version()", [], |row| row.get(0))
            .during("read storage version")
    }

    /// Explicitly release the connection, surfacing any error from the close.
    pub fn close(self) -> Result<(), StoreError> {
        self.conn
            .close()
            .map_err(|(_, source)| StoreError::Sqlite {
                operation: "close session",
                source,
            })?;
        tracing::debug!("session closed");
        Ok(())
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction scoping one check-then-act operation. Dropping the
    /// transaction without commit rolls it back.
    pub(crate) fn begin(&mut self, operation: &'static str) -> Result<Transaction<'_>, StoreError> {
        self.conn.transaction().during(operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn table_names(session: &Session) -> Vec<String> {
        let mut stmt = session
            .conn()
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get::<_, String>(0))
            .unwrap()
            .map(|r| r.unwrap())
            .filter(|name| !name.starts_with("sqlite_"))
            .collect()
    }

    #[test]
    fn in_memory_session_provisions_tables() {
        let session = Session::open_in_memory().unwrap();
        assert_eq!(
            table_names(&session),
            vec!["employee_managers", "employees", "ptlogs"]
        );
    }

    #[test]
    fn file_session_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("ptlog.db");

        let session = Session::open(&db_path).unwrap();
        session
            .conn()
            .execute(
                "INSERT INTO employees (name, designation) VALUES (?1, ?2)",
                ["Alice", "TeamMember"],
            )
            .unwrap();
        session.close().unwrap();

        // Provisioning again must not disturb existing rows
        let reopened = Session::open(&db_path).unwrap();
        let count: i64 = reopened
            .conn()
            .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn version_is_reported() {
        let session = Session::open_in_memory().unwrap();
        let version = session.version().unwrap();
        assert!(version.starts_with('3'), "unexpected version {version}");
    }

    #[test]
    fn uncommitted_transaction_rolls_back() {
        let mut session = Session::open_in_memory().unwrap();
        {
            let tx = session.begin("test").unwrap();
            tx.execute(
                "INSERT INTO employees (name, designation) VALUES ('Ghost', 'TeamMember')",
                [],
            )
            .unwrap();
        }
        let count: i64 = session
            .conn()
            .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
