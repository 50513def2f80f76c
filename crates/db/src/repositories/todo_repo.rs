//! Repository for the `todos` and `todo_tags` tables.
//!
//! A todo and its tag associations are always written in one transaction.
//! Updates write only the association rows that actually change.

use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use todo_core::associations::TagDelta;
use todo_core::entities::Todo;
use todo_core::error::{CoreError, CoreResult};
use todo_core::repository::TodoRepository;
use todo_core::types::DbId;

use crate::error::into_core;
use crate::models::todo::TodoRow;
use crate::DbPool;

/// Column list for `todos t` queries, including the ordered tag ids.
const COLUMNS: &str = "\
    t.id, t.title, t.body, t.status, t.due_date, t.completed_at, \
    t.user_id, t.category_id, \
    ARRAY(SELECT tt.tag_id FROM todo_tags tt WHERE tt.todo_id = t.id ORDER BY tt.tag_id) \
        AS tag_ids, \
    t.created_at, t.updated_at";

#[derive(Clone)]
pub struct PgTodoRepo {
    pool: DbPool,
}

impl PgTodoRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn fetch_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<TodoRow, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos t WHERE t.id = $1");
        sqlx::query_as::<_, TodoRow>(&query)
            .bind(id)
            .fetch_one(&mut **tx)
            .await
    }

    async fn current_tag_ids(
        tx: &mut Transaction<'_, Postgres>,
        todo_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT tag_id FROM todo_tags WHERE todo_id = $1")
            .bind(todo_id)
            .fetch_all(&mut **tx)
            .await
    }

    async fn apply_delta(
        tx: &mut Transaction<'_, Postgres>,
        todo_id: DbId,
        delta: &TagDelta,
    ) -> Result<(), sqlx::Error> {
        if !delta.removed.is_empty() {
            sqlx::query("DELETE FROM todo_tags WHERE todo_id = $1 AND tag_id = ANY($2)")
                .bind(todo_id)
                .bind(&delta.removed)
                .execute(&mut **tx)
                .await?;
        }
        if !delta.added.is_empty() {
            sqlx::query(
                "INSERT INTO todo_tags (todo_id, tag_id) \
                 SELECT $1, UNNEST($2::UUID[])",
            )
            .bind(todo_id)
            .bind(&delta.added)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepo {
    async fn create(&self, todo: &Todo) -> CoreResult<Todo> {
        let mut tx = self.pool.begin().await.map_err(into_core)?;

        sqlx::query(
            "INSERT INTO todos \
                (id, title, body, status, due_date, completed_at, user_id, category_id, \
                 created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(todo.id)
        .bind(&todo.title)
        .bind(&todo.body)
        .bind(todo.status.as_str())
        .bind(todo.due_date)
        .bind(todo.completed_at)
        .bind(todo.user_id)
        .bind(todo.category_id)
        .bind(todo.created_at)
        .bind(todo.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(into_core)?;

        let delta = TagDelta::between(&[], &todo.tag_ids);
        Self::apply_delta(&mut tx, todo.id, &delta)
            .await
            .map_err(into_core)?;

        let row = Self::fetch_in_tx(&mut tx, todo.id)
            .await
            .map_err(into_core)?;
        tx.commit().await.map_err(into_core)?;
        Todo::try_from(row)
    }

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Todo>> {
        let query = format!("SELECT {COLUMNS} FROM todos t WHERE t.id = $1");
        sqlx::query_as::<_, TodoRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(into_core)?
            .map(Todo::try_from)
            .transpose()
    }

    async fn find_all_by_owner(&self, owner_id: DbId) -> CoreResult<Vec<Todo>> {
        let query = format!(
            "SELECT {COLUMNS} FROM todos t WHERE t.user_id = $1 ORDER BY t.created_at, t.id"
        );
        sqlx::query_as::<_, TodoRow>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(into_core)?
            .into_iter()
            .map(Todo::try_from)
            .collect()
    }

    async fn update(&self, todo: &Todo) -> CoreResult<Todo> {
        let mut tx = self.pool.begin().await.map_err(into_core)?;

        // Locks the todo row, so concurrent updates reconcile tags in turn.
        let result = sqlx::query(
            "UPDATE todos SET \
                title = $2, body = $3, status = $4, due_date = $5, completed_at = $6, \
                category_id = $7, updated_at = $8 \
             WHERE id = $1",
        )
        .bind(todo.id)
        .bind(&todo.title)
        .bind(&todo.body)
        .bind(todo.status.as_str())
        .bind(todo.due_date)
        .bind(todo.completed_at)
        .bind(todo.category_id)
        .bind(todo.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(into_core)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::not_found("Todo", todo.id));
        }

        let current = Self::current_tag_ids(&mut tx, todo.id)
            .await
            .map_err(into_core)?;
        let delta = TagDelta::between(&current, &todo.tag_ids);
        if !delta.is_empty() {
            tracing::debug!(
                todo_id = %todo.id,
                added = delta.added.len(),
                removed = delta.removed.len(),
                "Reconciling todo tags"
            );
            Self::apply_delta(&mut tx, todo.id, &delta)
                .await
                .map_err(into_core)?;
        }

        let row = Self::fetch_in_tx(&mut tx, todo.id)
            .await
            .map_err(into_core)?;
        tx.commit().await.map_err(into_core)?;
        Todo::try_from(row)
    }

    async fn delete(&self, id: DbId) -> CoreResult<()> {
        sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(into_core)?;
        Ok(())
    }
}
