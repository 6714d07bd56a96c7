use anyhow::Context;
use tracing::{debug, info};

use crate::auth::password::hash_password;
use crate::users::{repo::UserStore, repo_types::NewUser};

/// Demo rows: (name, age, group).
const DEMO_USERS: &[(&str, i32, Option<i64>)] = &[("Alice", 30, Some(1)), ("Bob", 24, Some(1))];

/// Inserts the demo users that are not present yet. Safe to run on every
/// startup. Returns how many rows were inserted.
pub async fn seed_demo_users(users: &dyn UserStore, password: &str) -> anyhow::Result<usize> {
    let hashed_password = hash_password(password).context("hash seed password")?;

    let mut inserted = 0;
    for &(name, age, group_id) in DEMO_USERS {
        let new_user = NewUser {
            name: name.to_string(),
            age,
            group_id,
            hashed_password: hashed_password.clone(),
        };
        match users.insert_if_name_absent(&new_user).await? {
            Some(user) => {
                info!(user_id = user.id, name, "seeded demo user");
                inserted += 1;
            }
            None => debug!(name, "demo user already present"),
        }
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::verify_password;
    use crate::users::memory::MemoryUserStore;

    #[tokio::test]
    async fn seeding_twice_inserts_once() {
        let store = MemoryUserStore::default();
        assert_eq!(seed_demo_users(&store, "seed-password").await.unwrap(), 2);
        assert_eq!(seed_demo_users(&store, "seed-password").await.unwrap(), 0);

        let alice = store.find_by_name("Alice").await.unwrap();
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].age, 30);
        assert!(verify_password("seed-password", &alice[0].hashed_password).unwrap());
        assert_eq!(store.find_by_group(1).await.unwrap().len(), 2);
    }
}
