//! SQLite-backed connection provider.

use std::path::{Path, PathBuf};
use std::time::Duration;

use roster_types::{Employee, EmployeeRow};
use rusqlite::{params, Connection, OpenFlags};

use crate::error::StoreError;
use crate::provider::{ConnectionProvider, StoreConnection};
use crate::schema::init_schema;

const SELECT_EMPLOYEES: &str = "SELECT id, name, role FROM employees";
const INSERT_EMPLOYEE: &str = "INSERT INTO employees (id, name, role) VALUES (?1, ?2, ?3)";

/// Runtime tunables for SQLite connection behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbRuntimeSettings {
    /// Busy timeout for SQLite connections, in milliseconds.
    pub busy_timeout_ms: u64,
}

impl Default for DbRuntimeSettings {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
        }
    }
}

/// Opens a new SQLite connection to a database file on every request.
#[derive(Debug, Clone)]
pub struct SqliteProvider {
    path: PathBuf,
    settings: DbRuntimeSettings,
}

impl SqliteProvider {
    pub fn new(path: impl Into<PathBuf>, settings: DbRuntimeSettings) -> Self {
        Self {
            path: path.into(),
            settings,
        }
    }

    /// Path of the database file this provider opens.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a raw connection with WAL mode and the configured busy timeout.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the file cannot be opened or
    /// the connection cannot be configured.
    pub fn open(&self) -> Result<Connection, StoreError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_FULL_MUTEX;

        let conn =
            Connection::open_with_flags(&self.path, flags).map_err(StoreError::connection)?;

        conn.busy_timeout(Duration::from_millis(self.settings.busy_timeout_ms))
            .map_err(StoreError::connection)?;

        // In-memory databases report "memory", which is acceptable.
        let journal_mode: String = conn
            .query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))
            .map_err(StoreError::connection)?;
        if journal_mode != "wal" && journal_mode != "memory" {
            return Err(StoreError::Connection(format!(
                "failed to set WAL journal mode, got: {journal_mode}"
            )));
        }

        Ok(conn)
    }

    /// Creates the employee table in the target database if it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or the DDL
    /// fails.
    pub fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.open()?;
        init_schema(&conn)
    }
}

impl ConnectionProvider for SqliteProvider {
    fn get_connection(&self) -> Result<Box<dyn StoreConnection>, StoreError> {
        let conn = self.open()?;
        tracing::trace!(path = %self.path.display(), "opened sqlite connection");
        Ok(Box::new(SqliteConnection { conn }))
    }
}

/// A single SQLite connection handed out by [`SqliteProvider`].
///
/// Writes run inside an explicit transaction that is opened by the first
/// `insert_row` and closed by `commit`. Dropping the connection with the
/// transaction still open rolls it back.
#[derive(Debug)]
pub struct SqliteConnection {
    conn: Connection,
}

impl StoreConnection for SqliteConnection {
    fn query_all(&mut self) -> Result<Vec<EmployeeRow>, StoreError> {
        let mut stmt = self.conn.prepare(SELECT_EMPLOYEES)?;
        let rows = stmt
            .query_map([], |row| {
                Ok::<EmployeeRow, rusqlite::Error>((row.get(0)?, row.get(1)?, row.get(2)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn insert_row(&mut self, employee: &Employee) -> Result<(), StoreError> {
        if self.conn.is_autocommit() {
            self.conn.execute_batch("BEGIN IMMEDIATE")?;
        }
        self.conn.execute(
            INSERT_EMPLOYEE,
            params![employee.id, employee.name, employee.role],
        )?;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT")?;
        }
        Ok(())
    }
}

impl Drop for SqliteConnection {
    fn drop(&mut self) {
        if !self.conn.is_autocommit() {
            if let Err(e) = self.conn.execute_batch("ROLLBACK") {
                tracing::warn!("failed to roll back uncommitted write: {}", e);
            }
        }
    }
}
