//! Employee API handlers.
//!
//! Each request opens its own store connection inside `spawn_blocking`,
//! runs one statement and drops the connection before the response is
//! built. Nothing is cached between requests.

use crate::api::ApiError;
use crate::AppState;
use axum::extract::{rejection::JsonRejection, Extension, Json};
use roster_types::Employee;
use std::sync::Arc;

/// Handler for `GET /employees`.
pub async fn list_employees_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let employees = tokio::task::spawn_blocking(move || {
        let mut conn = state.provider.get_connection()?;
        let rows = conn.query_all()?;
        Ok::<_, ApiError>(rows.into_iter().map(Employee::from).collect::<Vec<_>>())
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("task join error: {}", e)))??;

    tracing::debug!(count = employees.len(), "listed employees");
    Ok(Json(employees))
}

/// Handler for `POST /employees`.
///
/// Responds with the validated request body rather than re-reading the
/// stored row.
pub async fn add_employee_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> Result<Json<Employee>, ApiError> {
    let Json(employee) = payload?;

    let record = employee.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = state.provider.get_connection()?;
        conn.insert_row(&record)?;
        conn.commit()?;
        Ok::<_, ApiError>(())
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("task join error: {}", e)))??;

    tracing::debug!(id = employee.id, "added employee");
    Ok(Json(employee))
}
