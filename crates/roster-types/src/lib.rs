//! Shared types for the roster service.
//!
//! The same [`Employee`] value travels both ways over HTTP: it is the
//! body of `POST /employees` and each element of the `GET /employees`
//! response. The store layer hands rows back as [`EmployeeRow`] tuples,
//! and the conversion between the two is purely positional.

use serde::{Deserialize, Serialize};

/// A stored row in column order `(id, name, role)`.
pub type EmployeeRow = (i64, String, String);

/// An employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Caller-supplied identifier. Never generated by the server.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Job role.
    pub role: String,
}

impl Employee {
    /// Builds an employee from its three fields.
    pub fn new(id: i64, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: role.into(),
        }
    }
}

impl From<EmployeeRow> for Employee {
    fn from((id, name, role): EmployeeRow) -> Self {
        Self { id, name, role }
    }
}

impl From<Employee> for EmployeeRow {
    fn from(employee: Employee) -> Self {
        (employee.id, employee.name, employee.role)
    }
}
