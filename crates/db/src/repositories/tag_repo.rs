use async_trait::async_trait;
use todo_core::entities::Tag;
use todo_core::error::{CoreError, CoreResult};
use todo_core::repository::TagRepository;
use todo_core::types::DbId;

use crate::error::into_core;
use crate::models::tag::TagRow;
use crate::DbPool;

/// Column list for `tags` queries.
const COLUMNS: &str = "id, name, user_id, created_at, updated_at";

/// `tags` table access. Names are unique per owner (`uq_tags_user_name`);
/// deleting a tag cascades to `todo_tags`.
#[derive(Clone)]
pub struct PgTagRepo {
    pool: DbPool,
}

impl PgTagRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepo {
    async fn create(&self, tag: &Tag) -> CoreResult<Tag> {
        let query = format!(
            "INSERT INTO tags (id, name, user_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TagRow>(&query)
            .bind(tag.id)
            .bind(&tag.name)
            .bind(tag.user_id)
            .bind(tag.created_at)
            .bind(tag.updated_at)
            .fetch_one(&self.pool)
            .await
            .map(Tag::from)
            .map_err(into_core)
    }

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Tag>> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, TagRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Tag::from))
            .map_err(into_core)
    }

    async fn find_all_by_owner(&self, owner_id: DbId) -> CoreResult<Vec<Tag>> {
        let query =
            format!("SELECT {COLUMNS} FROM tags WHERE user_id = $1 ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, TagRow>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(into_core)?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn find_by_name_for_owner(
        &self,
        owner_id: DbId,
        name: &str,
    ) -> CoreResult<Option<Tag>> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE user_id = $1 AND name = $2");
        sqlx::query_as::<_, TagRow>(&query)
            .bind(owner_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Tag::from))
            .map_err(into_core)
    }

    async fn update(&self, tag: &Tag) -> CoreResult<Tag> {
        let query = format!(
            "UPDATE tags SET name = $2, updated_at = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TagRow>(&query)
            .bind(tag.id)
            .bind(&tag.name)
            .bind(tag.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(into_core)?
            .map(Tag::from)
            .ok_or_else(|| CoreError::not_found("Tag", tag.id))
    }

    async fn delete(&self, id: DbId) -> CoreResult<()> {
        sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(into_core)?;
        Ok(())
    }
}
