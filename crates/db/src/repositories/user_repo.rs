use async_trait::async_trait;
use todo_core::entities::User;
use todo_core::error::{CoreError, CoreResult};
use todo_core::repository::UserRepository;
use todo_core::types::DbId;

use crate::error::into_core;
use crate::models::user::UserRow;
use crate::DbPool;

/// Column list for `users` queries.
const COLUMNS: &str = "\
    id, email, password_hash, name, avatar_url, timezone, created_at, updated_at";

/// `users` table access.
#[derive(Clone)]
pub struct PgUserRepo {
    pool: DbPool,
}

impl PgUserRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepo {
    async fn create(&self, user: &User) -> CoreResult<User> {
        let query = format!(
            "INSERT INTO users \
                (id, email, password_hash, name, avatar_url, timezone, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.name)
            .bind(&user.avatar_url)
            .bind(&user.timezone)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&self.pool)
            .await
            .map(User::from)
            .map_err(into_core)
    }

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(User::from))
            .map_err(into_core)
    }

    async fn find_by_email(&self, email: &str) -> CoreResult<Option<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(User::from))
            .map_err(into_core)
    }

    async fn update(&self, user: &User) -> CoreResult<User> {
        let query = format!(
            "UPDATE users SET \
                email = $2, password_hash = $3, name = $4, avatar_url = $5, \
                timezone = $6, updated_at = $7 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.name)
            .bind(&user.avatar_url)
            .bind(&user.timezone)
            .bind(user.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(into_core)?
            .map(User::from)
            .ok_or_else(|| CoreError::not_found("User", user.id))
    }

    async fn delete(&self, id: DbId) -> CoreResult<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(into_core)?;
        Ok(())
    }
}
