//! Schema bootstrap for the employee table.
//!
//! The table definition is embedded at compile time and applied with
//! `CREATE TABLE IF NOT EXISTS`, so running it against an existing database
//! changes nothing.

use rusqlite::Connection;

use crate::error::StoreError;

/// Name of the table every statement in this crate targets.
pub const EMPLOYEES_TABLE: &str = "employees";

const EMPLOYEES_SQL: &str = include_str!("sql/employees.sql");

/// Creates the employee table if it does not exist yet.
///
/// # Errors
///
/// Returns [`StoreError::Execution`] if the DDL statement fails.
pub fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(EMPLOYEES_SQL)?;
    tracing::debug!(table = EMPLOYEES_TABLE, "employee schema ready");
    Ok(())
}
