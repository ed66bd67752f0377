// Account store adapters

pub mod memory;
pub mod postgres;

#[cfg(test)]
pub mod stub;

use crate::models::user::{NewUser, User, UserChanges};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Insert hit the unique constraint on the account name
    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Persistence boundary for user rows
///
/// Implementations own uniqueness of `account` and the atomicity of each call.
/// Lookups return every matching row so callers can detect duplicates.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_account(&self, account: &str) -> Result<Vec<User>, StoreError>;

    async fn find_by_fullname(&self, fullname: &str) -> Result<Vec<User>, StoreError>;

    async fn list_all(&self) -> Result<Vec<User>, StoreError>;

    /// Fails with `DuplicateAccount` when the account is taken
    async fn insert(&self, user: &NewUser) -> Result<(), StoreError>;

    /// Apply the present fields of `changes`; a missing account is not an error
    async fn update_fields(&self, account: &str, changes: &UserChanges) -> Result<(), StoreError>;

    /// Remove the row if present; deleting an absent account succeeds
    async fn delete_by_account(&self, account: &str) -> Result<(), StoreError>;
}
