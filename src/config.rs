// ABOUTME: Configuration loading for the ptlog binary from environment variables and .env files.
// ABOUTME: Resolves the data directory, the database location, and the log filter directive.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PTLOG_DB is set but empty; unset it or give a database path")]
    EmptyDbPath,
}

/// Where the directory database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

impl DbLocation {
    fn parse(raw: &str) -> Self {
        if raw == ":memory:" {
            DbLocation::Memory
        } else {
            DbLocation::File(PathBuf::from(raw))
        }
    }
}

/// Runtime configuration for the ptlog binary.
#[derive(Debug, Clone)]
pub struct PtlogConfig {
    pub home: PathBuf,
    pub db: DbLocation,
    pub log_filter: Option<String>,
}

impl PtlogConfig {
    /// Load configuration from the process environment.
    ///
    /// Environment variables:
    /// - PTLOG_HOME: data directory (default: ~/.ptlog)
    /// - PTLOG_DB: database file, or `:memory:` (default: $PTLOG_HOME/ptlog.db)
    /// - PTLOG_LOG: tracing filter directive (optional, wins over RUST_LOG)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let home = lookup("PTLOG_HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                lookup("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
                    .join(".ptlog")
            });

        let db = match lookup("PTLOG_DB") {
            Some(raw) if raw.trim().is_empty() => return Err(ConfigError::EmptyDbPath),
            Some(raw) => DbLocation::parse(raw.trim()),
            None => DbLocation::File(home.join("ptlog.db")),
        };

        let log_filter = lookup("PTLOG_LOG").filter(|f| !f.is_empty());

        Ok(Self {
            home,
            db,
            log_filter,
        })
    }

    /// Apply a `--db` flag, which takes precedence over PTLOG_DB.
    pub fn with_db_override(mut self, db: Option<PathBuf>) -> Self {
        if let Some(path) = db {
            self.db = DbLocation::parse(&path.to_string_lossy());
        }
        self
    }
}
