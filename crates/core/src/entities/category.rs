use serde::Serialize;

use super::{require_owner, required_name};
use crate::error::CoreResult;
use crate::types::{DbId, Timestamp};

/// A user-owned grouping for todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DbId,
    pub name: String,
    /// Opaque to the server; clients validate the format.
    pub color: String,
    pub description: Option<String>,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Category {
    pub fn new(
        id: DbId,
        user_id: DbId,
        name: &str,
        color: &str,
        description: Option<String>,
        now: Timestamp,
    ) -> CoreResult<Self> {
        require_owner(user_id)?;
        Ok(Self {
            id,
            name: Self::validate_name(name)?,
            color: color.to_string(),
            description,
            user_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Trimmed, non-empty category name.
    pub fn validate_name(raw: &str) -> CoreResult<String> {
        required_name(raw, "Category name")
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn name_is_trimmed_and_required() {
        let now = Utc::now();
        let owner = Uuid::new_v4();

        let category =
            Category::new(Uuid::new_v4(), owner, "  Work ", "#ff0000", None, now).unwrap();
        assert_eq!(category.name, "Work");
        assert_eq!(category.created_at, category.updated_at);

        assert!(Category::new(Uuid::new_v4(), owner, " ", "#fff", None, now).is_err());
        assert!(Category::new(Uuid::new_v4(), Uuid::nil(), "Work", "#fff", None, now).is_err());
    }
}
