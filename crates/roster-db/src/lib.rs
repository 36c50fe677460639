//! Store layer for the roster service.
//!
//! Request handlers never talk to SQLite directly. They ask a
//! [`ConnectionProvider`] for a fresh [`StoreConnection`], run exactly one
//! typed operation on it and let it drop. The provider is the seam tests
//! replace with an in-memory fake.
//!
//! # Design decisions
//!
//! - **One connection per call**: [`SqliteProvider`] opens a new SQLite
//!   connection on every `get_connection` and never pools.
//! - **Typed operations**: connections expose `query_all` and `insert_row`
//!   instead of accepting arbitrary SQL, so a fake only has to model two
//!   operations.
//! - **Release on drop**: statements are scoped to the operation that
//!   prepares them and connections roll back any uncommitted write when
//!   dropped.

mod error;
mod provider;
mod schema;
mod sqlite;

pub use error::StoreError;
pub use provider::{ConnectionProvider, StoreConnection};
pub use schema::{init_schema, EMPLOYEES_TABLE};
pub use sqlite::{DbRuntimeSettings, SqliteConnection, SqliteProvider};
