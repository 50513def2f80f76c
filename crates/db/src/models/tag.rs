use sqlx::FromRow;
use todo_core::entities::Tag;
use todo_core::types::{DbId, Timestamp};

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow)]
pub struct TagRow {
    pub id: DbId,
    pub name: String,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
