use sqlx::FromRow;
use todo_core::entities::{Todo, TodoStatus};
use todo_core::error::CoreError;
use todo_core::types::{DbId, Timestamp};

/// A row from the `todos` table joined with its ordered tag ids.
#[derive(Debug, Clone, FromRow)]
pub struct TodoRow {
    pub id: DbId,
    pub title: String,
    pub body: Option<String>,
    pub status: String,
    pub due_date: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub user_id: DbId,
    pub category_id: Option<DbId>,
    pub tag_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<TodoRow> for Todo {
    type Error = CoreError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        let status: TodoStatus = row.status.parse().map_err(|_| {
            CoreError::Internal(format!("Todo {} has unknown status '{}'", row.id, row.status))
        })?;

        Ok(Self {
            id: row.id,
            title: row.title,
            body: row.body,
            status,
            due_date: row.due_date,
            completed_at: row.completed_at,
            user_id: row.user_id,
            category_id: row.category_id,
            tag_ids: row.tag_ids,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
