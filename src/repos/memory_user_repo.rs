//! In-memory `UserStore` for tests.
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::user_repo::{UserRow, UserStore};

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<Uuid, UserRow>>,
    id_lookups: AtomicUsize,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `find_by_id` calls seen so far.
    pub fn id_lookups(&self) -> usize {
        self.id_lookups.load(Ordering::SeqCst)
    }

    pub fn delete(&self, id: Uuid) -> bool {
        self.users.lock().unwrap().remove(&id).is_some()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user_name: &str, password_hash: &str) -> RepoResult<UserRow> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.user_name == user_name) {
            return Err(RepoError::Conflict);
        }

        let row = UserRow {
            id: Uuid::new_v4(),
            user_name: user_name.to_string(),
            password_hash: password_hash.to_string(),
            favourites: Vec::new(),
        };
        users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_user_name(&self, user_name: &str) -> RepoResult<Option<UserRow>> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.user_name == user_name).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<UserRow>> {
        self.id_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn add_favourite(
        &self,
        id: Uuid,
        item: &str,
        limit: usize,
    ) -> RepoResult<Option<Vec<String>>> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };

        if !user.favourites.iter().any(|f| f == item) {
            if user.favourites.len() >= limit {
                return Ok(None);
            }
            user.favourites.push(item.to_string());
        }
        Ok(Some(user.favourites.clone()))
    }

    async fn remove_favourite(&self, id: Uuid, item: &str) -> RepoResult<Option<Vec<String>>> {
        let mut users = self.users.lock().unwrap();
        Ok(users.get_mut(&id).map(|user| {
            user.favourites.retain(|f| f != item);
            user.favourites.clone()
        }))
    }
}
