//! In-memory users backend for exercising the screen logic.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use roster::api::{GatewayError, MutationOutcome, UsersGateway};
use roster::models::{Role, UserRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(UserRecord),
    Update(i64, UserRecord),
    Delete(i64),
}

#[derive(Default)]
struct Backend {
    records: Vec<UserRecord>,
    next_id: i64,
    calls: Vec<Call>,
    fail_list: bool,
    fail_mutations: bool,
    fail_delete: bool,
    bodyless_create: bool,
}

#[derive(Default)]
pub struct MemoryGateway {
    inner: Mutex<Backend>,
}

pub fn user(id: i64, full_name: &str, username: &str) -> UserRecord {
    UserRecord {
        id,
        full_name: full_name.to_string(),
        email: format!("{}@x.com", username),
        username: username.to_string(),
        password: String::new(),
        role: Role { id: 1, name: "admin".into() },
    }
}

impl MemoryGateway {
    pub fn with_records(records: Vec<UserRecord>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            inner: Mutex::new(Backend { records, next_id, ..Default::default() }),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls().iter().filter(|c| **c == Call::List).count()
    }

    pub fn records(&self) -> Vec<UserRecord> {
        self.inner.lock().unwrap().records.clone()
    }

    pub fn set_fail_list(&self, fail: bool) {
        self.inner.lock().unwrap().fail_list = fail;
    }

    pub fn set_fail_mutations(&self, fail: bool) {
        self.inner.lock().unwrap().fail_mutations = fail;
    }

    pub fn set_fail_delete(&self, fail: bool) {
        self.inner.lock().unwrap().fail_delete = fail;
    }

    /// Answer creates like a server replying 204: stored, but the id is not echoed back.
    pub fn set_bodyless_create(&self, bodyless: bool) {
        self.inner.lock().unwrap().bodyless_create = bodyless;
    }

    /// Change a record behind the view's back.
    pub fn server_side_rename(&self, id: i64, full_name: &str) {
        let mut b = self.inner.lock().unwrap();
        if let Some(r) = b.records.iter_mut().find(|r| r.id == id) {
            r.full_name = full_name.to_string();
        }
    }
}

fn conflict(records: &[UserRecord], candidate: &UserRecord) -> Option<String> {
    let others = records.iter().filter(|r| r.id != candidate.id);
    for r in others {
        if r.username == candidate.username {
            return Some("username already exists".into());
        }
        if !candidate.email.is_empty() && r.email == candidate.email {
            return Some("email already exists".into());
        }
    }
    None
}

#[async_trait]
impl UsersGateway for MemoryGateway {
    async fn list(&self) -> Result<Vec<UserRecord>, GatewayError> {
        let mut b = self.inner.lock().unwrap();
        b.calls.push(Call::List);
        if b.fail_list {
            return Err(GatewayError::Network("connection refused".into()));
        }
        Ok(b.records.clone())
    }

    async fn create(&self, record: &UserRecord) -> Result<MutationOutcome, GatewayError> {
        let mut b = self.inner.lock().unwrap();
        b.calls.push(Call::Create(record.clone()));
        if b.fail_mutations {
            return Err(GatewayError::Status { status: 500, message: "internal error".into() });
        }
        if let Some(message) = conflict(&b.records, record) {
            return Ok(MutationOutcome::Conflict(message));
        }
        let mut saved = record.clone();
        saved.id = b.next_id;
        b.next_id += 1;
        b.records.push(saved.clone());
        if b.bodyless_create {
            return Ok(MutationOutcome::Saved(record.clone()));
        }
        Ok(MutationOutcome::Saved(saved))
    }

    async fn update(&self, id: i64, record: &UserRecord) -> Result<MutationOutcome, GatewayError> {
        let mut b = self.inner.lock().unwrap();
        b.calls.push(Call::Update(id, record.clone()));
        if b.fail_mutations {
            return Err(GatewayError::Status { status: 500, message: "internal error".into() });
        }
        if let Some(message) = conflict(&b.records, record) {
            return Ok(MutationOutcome::Conflict(message));
        }
        match b.records.iter_mut().find(|r| r.id == id) {
            Some(existing) => {
                *existing = UserRecord { id, ..record.clone() };
                Ok(MutationOutcome::Saved(existing.clone()))
            }
            None => Err(GatewayError::Status { status: 404, message: "not found".into() }),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), GatewayError> {
        let mut b = self.inner.lock().unwrap();
        b.calls.push(Call::Delete(id));
        if b.fail_delete {
            return Err(GatewayError::Status { status: 500, message: "delete failed".into() });
        }
        b.records.retain(|r| r.id != id);
        Ok(())
    }
}
