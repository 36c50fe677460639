#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use roster_db::{ConnectionProvider, StoreConnection, StoreError};
use roster_server::{app, AppState};
use roster_types::{Employee, EmployeeRow};
use serde_json::Value;
use tower::ServiceExt;

/// How a [`FakeStore`] misbehaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// `get_connection` fails.
    Unreachable,
    /// Connections open, but every statement fails.
    ExecuteFails,
}

/// Counters recorded by a [`FakeStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreLog {
    pub opened: usize,
    pub closed: usize,
    pub queries: usize,
    pub inserts: usize,
    pub commits: usize,
}

#[derive(Default)]
struct FakeInner {
    rows: BTreeMap<i64, Employee>,
    failure: Option<Failure>,
    log: StoreLog,
}

/// In-memory stand-in for the employee store.
///
/// Rows live in a map keyed by id. Inserts are staged on the connection
/// and only land in the map on commit.
#[derive(Clone, Default)]
pub struct FakeStore {
    inner: Arc<Mutex<FakeInner>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(rows: impl IntoIterator<Item = Employee>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.lock().unwrap();
            for row in rows {
                inner.rows.insert(row.id, row);
            }
        }
        store
    }

    pub fn failing(failure: Failure) -> Self {
        let store = Self::new();
        store.inner.lock().unwrap().failure = Some(failure);
        store
    }

    pub fn rows(&self) -> Vec<Employee> {
        self.inner.lock().unwrap().rows.values().cloned().collect()
    }

    pub fn log(&self) -> StoreLog {
        self.inner.lock().unwrap().log.clone()
    }

    /// Builds a fresh application wired to this store.
    pub fn app(&self) -> Router {
        app(AppState::new(self.clone()))
    }
}

impl ConnectionProvider for FakeStore {
    fn get_connection(&self) -> Result<Box<dyn StoreConnection>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.failure == Some(Failure::Unreachable) {
            return Err(StoreError::Connection("connection refused".into()));
        }
        inner.log.opened += 1;
        Ok(Box::new(FakeConnection {
            store: self.clone(),
            staged: Vec::new(),
        }))
    }
}

struct FakeConnection {
    store: FakeStore,
    staged: Vec<Employee>,
}

impl StoreConnection for FakeConnection {
    fn query_all(&mut self) -> Result<Vec<EmployeeRow>, StoreError> {
        let mut inner = self.store.inner.lock().unwrap();
        inner.log.queries += 1;
        if inner.failure == Some(Failure::ExecuteFails) {
            return Err(StoreError::Execution("relation \"employees\" does not exist".into()));
        }
        Ok(inner.rows.values().cloned().map(EmployeeRow::from).collect())
    }

    fn insert_row(&mut self, employee: &Employee) -> Result<(), StoreError> {
        let mut inner = self.store.inner.lock().unwrap();
        inner.log.inserts += 1;
        if inner.failure == Some(Failure::ExecuteFails) {
            return Err(StoreError::Execution("insert rejected".into()));
        }
        let duplicate = inner.rows.contains_key(&employee.id)
            || self.staged.iter().any(|staged| staged.id == employee.id);
        if duplicate {
            return Err(StoreError::Execution(format!(
                "duplicate key value violates unique constraint: id={}",
                employee.id
            )));
        }
        self.staged.push(employee.clone());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        let mut inner = self.store.inner.lock().unwrap();
        inner.log.commits += 1;
        for employee in self.staged.drain(..) {
            inner.rows.insert(employee.id, employee);
        }
        Ok(())
    }
}

impl Drop for FakeConnection {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.store.inner.lock() {
            inner.log.closed += 1;
        }
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    post_raw(uri, &body.to_string())
}

pub fn post_raw(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Sends a request through the router and returns status plus JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
