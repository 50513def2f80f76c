//! The todo entity and its status lifecycle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::require_owner;
use crate::error::{CoreError, CoreResult};
use crate::types::{DbId, Timestamp};
use crate::values::{Body, DueDate, Title, MAX_TITLE_CHARS};

/// Marker appended to the title of a duplicated todo.
pub const COPY_SUFFIX: &str = " (Copy)";

/// Workflow state of a todo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl TodoStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TodoStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TODO" => Ok(Self::Todo),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            other => Err(CoreError::Validation(format!(
                "Unknown todo status '{other}'"
            ))),
        }
    }
}

/// A single to-do item.
///
/// Invariant: `completed_at.is_some()` exactly when `status` is
/// [`TodoStatus::Completed`]. `tag_ids` is kept sorted and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: DbId,
    pub title: String,
    pub body: Option<String>,
    pub status: TodoStatus,
    pub due_date: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub user_id: DbId,
    /// Weak reference, existence checked only when written.
    pub category_id: Option<DbId>,
    /// Weak references, existence checked only when written.
    pub tag_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated input for [`Todo::new`].
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: Title,
    pub body: Option<Body>,
    pub due_date: Option<DueDate>,
    pub user_id: DbId,
    pub category_id: Option<DbId>,
    pub tag_ids: Vec<DbId>,
}

impl Todo {
    /// Build a fresh todo in the [`TodoStatus::Todo`] state.
    pub fn new(id: DbId, input: NewTodo, now: Timestamp) -> CoreResult<Self> {
        require_owner(input.user_id)?;

        Ok(Self {
            id,
            title: input.title.into_inner(),
            body: input.body.map(Body::into_inner),
            status: TodoStatus::Todo,
            due_date: input.due_date.map(|d| d.value()),
            completed_at: None,
            user_id: input.user_id,
            category_id: input.category_id,
            tag_ids: normalize_tag_ids(input.tag_ids),
            created_at: now,
            updated_at: now,
        })
    }

    /// Move to `status`, stamping or clearing `completed_at` to match.
    pub fn set_status(&mut self, status: TodoStatus, now: Timestamp) {
        self.status = status;
        self.completed_at = (status == TodoStatus::Completed).then_some(now);
        self.updated_at = now;
    }

    /// Replace the tag set, normalizing order and duplicates.
    pub fn set_tag_ids(&mut self, tag_ids: Vec<DbId>) {
        self.tag_ids = normalize_tag_ids(tag_ids);
    }

    pub fn touch(&mut self, now: Timestamp) {
        self.updated_at = now;
    }

    /// Copy of this todo under a new id, reset to [`TodoStatus::Todo`].
    ///
    /// The title gets [`COPY_SUFFIX`]; the source title is shortened first
    /// when the copy would otherwise exceed the title limit.
    pub fn duplicate(&self, id: DbId, now: Timestamp) -> Self {
        Self {
            id,
            title: copy_title(&self.title),
            body: self.body.clone(),
            status: TodoStatus::Todo,
            due_date: self.due_date,
            completed_at: None,
            user_id: self.user_id,
            category_id: self.category_id,
            tag_ids: self.tag_ids.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

fn copy_title(title: &str) -> String {
    let room = MAX_TITLE_CHARS - COPY_SUFFIX.chars().count();
    let base: String = title.chars().take(room).collect();
    format!("{base}{COPY_SUFFIX}")
}

/// Sort and deduplicate a set of tag ids.
pub fn normalize_tag_ids(mut tag_ids: Vec<DbId>) -> Vec<DbId> {
    tag_ids.sort_unstable();
    tag_ids.dedup();
    tag_ids
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap()
    }

    fn sample(title: &str) -> Todo {
        let input = NewTodo {
            title: Title::new(title).unwrap(),
            body: Some(Body::new("notes").unwrap()),
            due_date: None,
            user_id: Uuid::new_v4(),
            category_id: None,
            tag_ids: vec![],
        };
        Todo::new(Uuid::new_v4(), input, now()).unwrap()
    }

    #[test]
    fn new_todo_starts_open() {
        let todo = sample("Buy milk");
        assert_eq!(todo.status, TodoStatus::Todo);
        assert_eq!(todo.completed_at, None);
        assert_eq!(todo.created_at, todo.updated_at);
    }

    #[test]
    fn nil_owner_is_rejected() {
        let input = NewTodo {
            title: Title::new("t").unwrap(),
            body: None,
            due_date: None,
            user_id: Uuid::nil(),
            category_id: None,
            tag_ids: vec![],
        };
        assert!(Todo::new(Uuid::new_v4(), input, now()).is_err());
    }

    #[test]
    fn tag_ids_are_deduplicated() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut todo = sample("t");
        todo.set_tag_ids(vec![b, a, b, a]);
        assert_eq!(todo.tag_ids.len(), 2);
        assert!(todo.tag_ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn completion_timestamp_tracks_status() {
        let mut todo = sample("t");
        let later = now() + Duration::minutes(5);

        todo.set_status(TodoStatus::Completed, later);
        assert_eq!(todo.completed_at, Some(later));
        assert_eq!(todo.updated_at, later);

        todo.set_status(TodoStatus::InProgress, later + Duration::minutes(1));
        assert_eq!(todo.completed_at, None);
    }

    #[test]
    fn duplicate_resets_lifecycle() {
        let mut original = sample("Write report");
        original.set_status(TodoStatus::Completed, now());
        let copy = original.duplicate(Uuid::new_v4(), now() + Duration::hours(1));

        assert_ne!(copy.id, original.id);
        assert_eq!(copy.title, "Write report (Copy)");
        assert_eq!(copy.status, TodoStatus::Todo);
        assert_eq!(copy.completed_at, None);
        assert_eq!(copy.body, original.body);
        assert_eq!(copy.user_id, original.user_id);
    }

    #[test]
    fn duplicate_of_max_length_title_still_fits() {
        let original = sample(&"t".repeat(MAX_TITLE_CHARS));
        let copy = original.duplicate(Uuid::new_v4(), now());
        assert_eq!(copy.title.chars().count(), MAX_TITLE_CHARS);
        assert!(copy.title.ends_with(COPY_SUFFIX));
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in [TodoStatus::Todo, TodoStatus::InProgress, TodoStatus::Completed] {
            assert_eq!(status.as_str().parse::<TodoStatus>().unwrap(), status);
        }
        assert!("DONE".parse::<TodoStatus>().is_err());
    }
}
