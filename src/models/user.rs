use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `users` table
///
/// The password is kept in clear text to stay wire-compatible with existing
/// clients, so it is part of the serialized record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique account name, immutable after signup
    pub account: String,
    pub password: String,
    pub fullname: String,
    /// Set by the store on insert
    pub created_at: DateTime<Utc>,
    /// Set by the store on insert and on every update
    pub updated_at: DateTime<Utc>,
}

/// Validated signup payload handed to the store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub account: String,
    pub password: String,
    pub fullname: String,
}

impl NewUser {
    pub fn new(account: String, password: String, fullname: String) -> Self {
        Self {
            account,
            password,
            fullname,
        }
    }
}

/// Fields to change on an existing user; `None` leaves the column untouched
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub password: Option<String>,
    pub fullname: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.password.is_none() && self.fullname.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_changes_empty() {
        assert!(UserChanges::default().is_empty());

        let changes = UserChanges {
            password: None,
            fullname: Some("Joe".to_string()),
        };
        assert!(!changes.is_empty());
    }

    #[test]
    fn test_user_serializes_full_record() {
        let now = Utc::now();
        let user = User {
            account: "ABCDEFGH".to_string(),
            password: "12345678".to_string(),
            fullname: "Joe".to_string(),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["account"], "ABCDEFGH");
        assert_eq!(value["password"], "12345678");
        assert_eq!(value["fullname"], "Joe");
        assert!(value["created_at"].is_string());
        assert!(value["updated_at"].is_string());
    }
}
