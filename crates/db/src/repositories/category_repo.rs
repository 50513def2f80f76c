use async_trait::async_trait;
use todo_core::entities::Category;
use todo_core::error::{CoreError, CoreResult};
use todo_core::repository::CategoryRepository;
use todo_core::types::DbId;

use crate::error::into_core;
use crate::models::category::CategoryRow;
use crate::DbPool;

/// Column list for `categories` queries.
const COLUMNS: &str = "id, name, color, description, user_id, created_at, updated_at";

/// `categories` table access. Deleting a row nulls `todos.category_id`
/// through the foreign key.
#[derive(Clone)]
pub struct PgCategoryRepo {
    pool: DbPool,
}

impl PgCategoryRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepo {
    async fn create(&self, category: &Category) -> CoreResult<Category> {
        let query = format!(
            "INSERT INTO categories \
                (id, name, color, description, user_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CategoryRow>(&query)
            .bind(category.id)
            .bind(&category.name)
            .bind(&category.color)
            .bind(&category.description)
            .bind(category.user_id)
            .bind(category.created_at)
            .bind(category.updated_at)
            .fetch_one(&self.pool)
            .await
            .map(Category::from)
            .map_err(into_core)
    }

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Category>> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, CategoryRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Category::from))
            .map_err(into_core)
    }

    async fn find_all_by_owner(&self, owner_id: DbId) -> CoreResult<Vec<Category>> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories WHERE user_id = $1 ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, CategoryRow>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(into_core)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn update(&self, category: &Category) -> CoreResult<Category> {
        let query = format!(
            "UPDATE categories SET \
                name = $2, color = $3, description = $4, updated_at = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CategoryRow>(&query)
            .bind(category.id)
            .bind(&category.name)
            .bind(&category.color)
            .bind(&category.description)
            .bind(category.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(into_core)?
            .map(Category::from)
            .ok_or_else(|| CoreError::not_found("Category", category.id))
    }

    async fn delete(&self, id: DbId) -> CoreResult<()> {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(into_core)?;
        Ok(())
    }
}
