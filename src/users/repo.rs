use anyhow::Context;
use axum::async_trait;
use sqlx::PgPool;

use super::repo_types::{NewUser, User};

/// Access to the persisted user table.
///
/// Every filter value is passed to the database as a bound parameter.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;
    async fn find_by_name(&self, name: &str) -> anyhow::Result<Vec<User>>;
    async fn find_by_group(&self, group_id: i64) -> anyhow::Result<Vec<User>>;
    /// Returns `false` when no row had that id.
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
    /// Returns `false` when no row had that id.
    async fn update_password_hash(&self, id: i64, hashed_password: &str) -> anyhow::Result<bool>;
    /// Inserts unless a user with the same name already exists.
    async fn insert_if_name_absent(&self, new_user: &NewUser) -> anyhow::Result<Option<User>>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, age, group_id, hashed_password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, age, group_id, hashed_password
            FROM users
            WHERE name = $1
            ORDER BY id
            "#,
        )
        .bind(name)
        .fetch_all(&self.db)
        .await
        .context("find users by name")?;
        Ok(rows)
    }

    async fn find_by_group(&self, group_id: i64) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, age, group_id, hashed_password
            FROM users
            WHERE group_id = $1
            ORDER BY id
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.db)
        .await
        .context("find users by group")?;
        Ok(rows)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        let result = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("delete user")?;
        tx.commit().await.context("commit tx")?;
        Ok(result.rows_affected() == 1)
    }

    async fn update_password_hash(&self, id: i64, hashed_password: &str) -> anyhow::Result<bool> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        let result = sqlx::query(r#"UPDATE users SET hashed_password = $2 WHERE id = $1"#)
            .bind(id)
            .bind(hashed_password)
            .execute(&mut *tx)
            .await
            .context("update password hash")?;
        tx.commit().await.context("commit tx")?;
        Ok(result.rows_affected() == 1)
    }

    async fn insert_if_name_absent(&self, new_user: &NewUser) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, age, group_id, hashed_password)
            SELECT $1, $2, $3, $4
            WHERE NOT EXISTS (SELECT 1 FROM users WHERE name = $1)
            RETURNING id, name, age, group_id, hashed_password
            "#,
        )
        .bind(&new_user.name)
        .bind(new_user.age)
        .bind(new_user.group_id)
        .bind(&new_user.hashed_password)
        .fetch_optional(&self.db)
        .await
        .context("insert user")?;
        Ok(user)
    }
}
