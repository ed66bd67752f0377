// Scripted store for exercising failure paths in handler tests

use crate::models::user::{NewUser, User, UserChanges};
use crate::stores::{AccountStore, StoreError};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::Mutex;

pub enum Script {
    Rows(Vec<User>),
    Fail,
}

/// Every lookup answers with `lookups`; every write with `writes`
pub struct StubStore {
    lookups: Script,
    writes: Option<StoreErrorKind>,
    calls: Mutex<Vec<String>>,
}

#[derive(Clone, Copy)]
pub enum StoreErrorKind {
    Duplicate,
    Backend,
}

impl StubStore {
    pub fn rows(rows: Vec<User>) -> Self {
        Self {
            lookups: Script::Rows(rows),
            writes: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            lookups: Script::Fail,
            writes: Some(StoreErrorKind::Backend),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_write_error(mut self, kind: StoreErrorKind) -> Self {
        self.writes = Some(kind);
        self
    }

    pub fn called(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn lookup(&self, call: &str) -> Result<Vec<User>, StoreError> {
        self.record(call);
        match &self.lookups {
            Script::Rows(rows) => Ok(rows.clone()),
            Script::Fail => Err(StoreError::Backend("mock error".to_string())),
        }
    }

    fn write(&self, call: &str, account: &str) -> Result<(), StoreError> {
        self.record(call);
        match self.writes {
            None => Ok(()),
            Some(StoreErrorKind::Duplicate) => Err(StoreError::DuplicateAccount(account.to_string())),
            Some(StoreErrorKind::Backend) => Err(StoreError::Backend("mock error".to_string())),
        }
    }
}

pub fn user(account: &str, password: &str, fullname: &str) -> User {
    let at = Utc.timestamp_opt(0, 0).unwrap();
    User {
        account: account.to_string(),
        password: password.to_string(),
        fullname: fullname.to_string(),
        created_at: at,
        updated_at: at,
    }
}

#[async_trait]
impl AccountStore for StubStore {
    async fn find_by_account(&self, _account: &str) -> Result<Vec<User>, StoreError> {
        self.lookup("find_by_account")
    }

    async fn find_by_fullname(&self, _fullname: &str) -> Result<Vec<User>, StoreError> {
        self.lookup("find_by_fullname")
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        self.lookup("list_all")
    }

    async fn insert(&self, user: &NewUser) -> Result<(), StoreError> {
        self.write("insert", &user.account)
    }

    async fn update_fields(&self, account: &str, _changes: &UserChanges) -> Result<(), StoreError> {
        self.write("update_fields", account)
    }

    async fn delete_by_account(&self, account: &str) -> Result<(), StoreError> {
        self.write("delete_by_account", account)
    }
}
