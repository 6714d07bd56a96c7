use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use axum::async_trait;

use super::repo::UserStore;
use super::repo_types::{NewUser, User};

/// In-process store used by router tests in place of Postgres.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
    last_id: AtomicI64,
}

impl MemoryUserStore {
    fn rows(&self) -> std::sync::MutexGuard<'_, Vec<User>> {
        self.rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn filtered(&self, keep: impl Fn(&User) -> bool) -> Vec<User> {
        self.rows().iter().filter(|u| keep(u)).cloned().collect()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        Ok(self.rows().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Vec<User>> {
        Ok(self.filtered(|u| u.name == name))
    }

    async fn find_by_group(&self, group_id: i64) -> anyhow::Result<Vec<User>> {
        Ok(self.filtered(|u| u.group_id == Some(group_id)))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let mut rows = self.rows();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        Ok(rows.len() < before)
    }

    async fn update_password_hash(&self, id: i64, hashed_password: &str) -> anyhow::Result<bool> {
        let mut rows = self.rows();
        match rows.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.hashed_password = hashed_password.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_if_name_absent(&self, new_user: &NewUser) -> anyhow::Result<Option<User>> {
        let mut rows = self.rows();
        if rows.iter().any(|u| u.name == new_user.name) {
            return Ok(None);
        }
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            name: new_user.name.clone(),
            age: new_user.age,
            group_id: new_user.group_id,
            hashed_password: new_user.hashed_password.clone(),
        };
        rows.push(user.clone());
        Ok(Some(user))
    }
}
