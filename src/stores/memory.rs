use crate::models::user::{NewUser, User, UserChanges};
use crate::stores::{AccountStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// In-memory account store keyed by account name
pub struct MemoryStore {
    users: DashMap<String, User>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn collect_sorted<F>(&self, filter: F) -> Vec<User>
    where
        F: Fn(&User) -> bool,
    {
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|entry| filter(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        users.sort_by(|a, b| a.account.cmp(&b.account));
        users
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_by_account(&self, account: &str) -> Result<Vec<User>, StoreError> {
        Ok(self
            .users
            .get(account)
            .map(|entry| vec![entry.value().clone()])
            .unwrap_or_default())
    }

    async fn find_by_fullname(&self, fullname: &str) -> Result<Vec<User>, StoreError> {
        Ok(self.collect_sorted(|user| user.fullname == fullname))
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.collect_sorted(|_| true))
    }

    async fn insert(&self, user: &NewUser) -> Result<(), StoreError> {
        match self.users.entry(user.account.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateAccount(user.account.clone())),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                slot.insert(User {
                    account: user.account.clone(),
                    password: user.password.clone(),
                    fullname: user.fullname.clone(),
                    created_at: now,
                    updated_at: now,
                });
                Ok(())
            }
        }
    }

    async fn update_fields(&self, account: &str, changes: &UserChanges) -> Result<(), StoreError> {
        if changes.is_empty() {
            return Ok(());
        }

        if let Some(mut entry) = self.users.get_mut(account) {
            let user = entry.value_mut();
            if let Some(password) = &changes.password {
                user.password = password.clone();
            }
            if let Some(fullname) = &changes.fullname {
                user.fullname = fullname.clone();
            }
            user.updated_at = Utc::now();
        }

        Ok(())
    }

    async fn delete_by_account(&self, account: &str) -> Result<(), StoreError> {
        self.users.remove(account);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(account: &str, fullname: &str) -> NewUser {
        NewUser::new(account.to_string(), "12345678".to_string(), fullname.to_string())
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryStore::new();
        store.insert(&new_user("ABCDEFGH", "Joe")).await.unwrap();

        let rows = store.find_by_account("ABCDEFGH").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].password, "12345678");
        assert_eq!(rows[0].fullname, "Joe");
        assert_eq!(rows[0].created_at, rows[0].updated_at);

        assert!(store.find_by_account("missing_1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_insert_keeps_one_row() {
        let store = MemoryStore::new();
        store.insert(&new_user("ABCDEFGH", "Joe")).await.unwrap();

        let err = store.insert(&new_user("ABCDEFGH", "Other")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateAccount(ref a) if a == "ABCDEFGH"));

        assert_eq!(store.len(), 1);
        let rows = store.find_by_account("ABCDEFGH").await.unwrap();
        assert_eq!(rows[0].fullname, "Joe");
    }

    #[tokio::test]
    async fn test_concurrent_inserts_single_winner() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let mut handles = Vec::new();

        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .insert(&new_user("racer_account", &format!("racer {}", i)))
                    .await
                    .is_ok()
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_list_and_fullname_sorted() {
        let store = MemoryStore::new();
        store.insert(&new_user("zeta_user", "Joe")).await.unwrap();
        store.insert(&new_user("alpha_user", "Joe")).await.unwrap();
        store.insert(&new_user("mid_user_1", "Ann")).await.unwrap();

        let all: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.account)
            .collect();
        assert_eq!(all, vec!["alpha_user", "mid_user_1", "zeta_user"]);

        let joes: Vec<String> = store
            .find_by_fullname("Joe")
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.account)
            .collect();
        assert_eq!(joes, vec!["alpha_user", "zeta_user"]);

        assert!(store.find_by_fullname("Nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_update() {
        let store = MemoryStore::new();
        store.insert(&new_user("ABCDEFGH", "Joe")).await.unwrap();

        let changes = UserChanges {
            password: None,
            fullname: Some("Joseph".to_string()),
        };
        store.update_fields("ABCDEFGH", &changes).await.unwrap();

        let row = &store.find_by_account("ABCDEFGH").await.unwrap()[0];
        assert_eq!(row.fullname, "Joseph");
        assert_eq!(row.password, "12345678");
        assert!(row.updated_at >= row.created_at);
    }

    #[tokio::test]
    async fn test_empty_update_is_noop() {
        let store = MemoryStore::new();
        store.insert(&new_user("ABCDEFGH", "Joe")).await.unwrap();
        let before = store.find_by_account("ABCDEFGH").await.unwrap();

        store
            .update_fields("ABCDEFGH", &UserChanges::default())
            .await
            .unwrap();

        assert_eq!(store.find_by_account("ABCDEFGH").await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_missing_account() {
        let store = MemoryStore::new();
        let changes = UserChanges {
            password: Some("87654321".to_string()),
            fullname: None,
        };

        assert!(store.update_fields("missing_1", &changes).await.is_ok());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        store.insert(&new_user("ABCDEFGH", "Joe")).await.unwrap();

        store.delete_by_account("ABCDEFGH").await.unwrap();
        store.delete_by_account("ABCDEFGH").await.unwrap();

        assert!(store.is_empty());
    }
}
