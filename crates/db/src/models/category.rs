use sqlx::FromRow;
use todo_core::entities::Category;
use todo_core::types::{DbId, Timestamp};

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub description: Option<String>,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            color: row.color,
            description: row.description,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
