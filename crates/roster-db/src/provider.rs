//! The connection factory seam.

use roster_types::{Employee, EmployeeRow};

use crate::error::StoreError;

/// Produces store connections on demand.
///
/// Implementations are shared across requests behind an `Arc`, so they hold
/// no per-request state. Every call returns a connection owned exclusively
/// by the caller.
pub trait ConnectionProvider: Send + Sync {
    /// Opens a new connection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the store is unreachable.
    fn get_connection(&self) -> Result<Box<dyn StoreConnection>, StoreError>;
}

/// A live connection to the employee store.
///
/// Dropping a connection closes it. A write that has not been committed
/// when the connection is dropped is discarded.
pub trait StoreConnection: Send {
    /// Reads every employee row in store order.
    fn query_all(&mut self) -> Result<Vec<EmployeeRow>, StoreError>;

    /// Stages a single row for insertion. Nothing is visible to other
    /// connections until [`StoreConnection::commit`] succeeds.
    fn insert_row(&mut self, employee: &Employee) -> Result<(), StoreError>;

    /// Commits staged writes. A no-op when nothing is staged.
    fn commit(&mut self) -> Result<(), StoreError>;
}
