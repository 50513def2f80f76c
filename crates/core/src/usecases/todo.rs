//! Todo use cases.
//!
//! Every mutating use case loads the target, runs [`ensure_owner`] and only
//! then writes. Input is validated in full before anything is persisted.

use std::sync::Arc;

use uuid::Uuid;

use crate::clock::Clock;
use crate::entities::todo::normalize_tag_ids;
use crate::entities::{NewTodo, Todo, TodoStatus};
use crate::error::{CoreError, CoreResult};
use crate::ids::IdGenerator;
use crate::ownership::ensure_owner;
use crate::repository::{CategoryRepository, TagRepository, TodoRepository};
use crate::types::{DbId, Timestamp};
use crate::values::{Body, DueDate, Title};

/// Resolves category and tag references supplied with a todo.
///
/// A reference resolves only when the id parses, the row exists and the row
/// belongs to the caller; anything else is [`CoreError::InvalidReference`].
#[derive(Clone)]
pub struct References {
    pub categories: Arc<dyn CategoryRepository>,
    pub tags: Arc<dyn TagRepository>,
}

impl References {
    async fn category(&self, caller: DbId, raw: &str) -> CoreResult<DbId> {
        let invalid = || CoreError::invalid_reference("Category", raw);
        let id = Uuid::parse_str(raw.trim()).map_err(|_| invalid())?;

        match self.categories.find_by_id(id).await? {
            Some(category) if category.user_id == caller => Ok(id),
            _ => Err(invalid()),
        }
    }

    async fn tags(&self, caller: DbId, raw: &[String]) -> CoreResult<Vec<DbId>> {
        let mut ids = Vec::with_capacity(raw.len());
        for item in raw {
            let id = Uuid::parse_str(item.trim())
                .map_err(|_| CoreError::invalid_reference("Tag", item.as_str()))?;
            ids.push(id);
        }
        let ids = normalize_tag_ids(ids);

        for id in &ids {
            match self.tags.find_by_id(*id).await? {
                Some(tag) if tag.user_id == caller => {}
                _ => return Err(CoreError::invalid_reference("Tag", id.to_string())),
            }
        }
        Ok(ids)
    }

    /// `None` and blank input both mean "no category".
    async fn optional_category(&self, caller: DbId, raw: Option<&str>) -> CoreResult<Option<DbId>> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => self.category(caller, raw).await.map(Some),
            None => Ok(None),
        }
    }
}

async fn load_owned(todos: &dyn TodoRepository, caller: DbId, id: DbId) -> CoreResult<Todo> {
    let todo = todos
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Todo", id))?;
    ensure_owner(caller, &todo)?;
    Ok(todo)
}

/// Raw input for [`CreateTodo`].
#[derive(Debug, Clone, Default)]
pub struct CreateTodoInput {
    pub title: String,
    pub body: Option<String>,
    pub due_date: Option<Timestamp>,
    pub category_id: Option<String>,
    pub tag_ids: Vec<String>,
}

#[derive(Clone)]
pub struct CreateTodo {
    pub todos: Arc<dyn TodoRepository>,
    pub refs: References,
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn IdGenerator>,
}

impl CreateTodo {
    pub async fn execute(&self, caller: DbId, input: CreateTodoInput) -> CoreResult<Todo> {
        let now = self.clock.now();
        let title = Title::new(&input.title)?;
        let body = input.body.as_deref().map(Body::new).transpose()?;
        let due_date = input
            .due_date
            .map(|at| DueDate::new(at, now))
            .transpose()?;
        let category_id = self
            .refs
            .optional_category(caller, input.category_id.as_deref())
            .await?;
        let tag_ids = self.refs.tags(caller, &input.tag_ids).await?;

        let todo = Todo::new(
            self.ids.next_id(),
            NewTodo {
                title,
                body,
                due_date,
                user_id: caller,
                category_id,
                tag_ids,
            },
            now,
        )?;
        let created = self.todos.create(&todo).await?;

        tracing::debug!(todo_id = %created.id, user_id = %caller, "Todo created");
        Ok(created)
    }
}

#[derive(Clone)]
pub struct ListTodos {
    pub todos: Arc<dyn TodoRepository>,
}

impl ListTodos {
    pub async fn execute(&self, caller: DbId) -> CoreResult<Vec<Todo>> {
        let todos = self.todos.find_all_by_owner(caller).await?;
        tracing::debug!(count = todos.len(), user_id = %caller, "Listed todos");
        Ok(todos)
    }
}

/// Plain lookup. Callers exposing the result must check ownership.
#[derive(Clone)]
pub struct FindTodoById {
    pub todos: Arc<dyn TodoRepository>,
}

impl FindTodoById {
    pub async fn execute(&self, id: DbId) -> CoreResult<Todo> {
        self.todos
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Todo", id))
    }
}

/// Partial update for [`UpdateTodo`]. `None` leaves a field unchanged.
///
/// An empty `body` or `category_id` clears that field.
#[derive(Debug, Clone, Default)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    pub due_date: Option<Timestamp>,
    pub status: Option<TodoStatus>,
    pub category_id: Option<String>,
    pub tag_ids: Option<Vec<String>>,
}

#[derive(Clone)]
pub struct UpdateTodo {
    pub todos: Arc<dyn TodoRepository>,
    pub refs: References,
    pub clock: Arc<dyn Clock>,
}

impl UpdateTodo {
    pub async fn execute(&self, caller: DbId, id: DbId, changes: TodoChanges) -> CoreResult<Todo> {
        let mut todo = load_owned(self.todos.as_ref(), caller, id).await?;
        let now = self.clock.now();

        if let Some(title) = changes.title {
            todo.title = Title::new(&title)?.into_inner();
        }
        if let Some(body) = changes.body {
            todo.body = if body.is_empty() {
                None
            } else {
                Some(Body::new(&body)?.into_inner())
            };
        }
        if let Some(at) = changes.due_date {
            todo.due_date = Some(DueDate::new(at, now)?.value());
        }
        if let Some(raw) = changes.category_id {
            todo.category_id = self.refs.optional_category(caller, Some(raw.as_str())).await?;
        }
        if let Some(raw) = changes.tag_ids {
            todo.set_tag_ids(self.refs.tags(caller, &raw).await?);
        }
        if let Some(status) = changes.status {
            if status != todo.status {
                todo.set_status(status, now);
            }
        }
        todo.touch(now);

        let updated = self.todos.update(&todo).await?;
        tracing::debug!(todo_id = %updated.id, "Todo updated");
        Ok(updated)
    }
}

#[derive(Clone)]
pub struct ToggleTodoStatus {
    pub todos: Arc<dyn TodoRepository>,
    pub clock: Arc<dyn Clock>,
}

impl ToggleTodoStatus {
    pub async fn execute(&self, caller: DbId, id: DbId, status: TodoStatus) -> CoreResult<Todo> {
        let mut todo = load_owned(self.todos.as_ref(), caller, id).await?;
        todo.set_status(status, self.clock.now());

        let updated = self.todos.update(&todo).await?;
        tracing::debug!(todo_id = %updated.id, status = %updated.status, "Todo status changed");
        Ok(updated)
    }
}

#[derive(Clone)]
pub struct DuplicateTodo {
    pub todos: Arc<dyn TodoRepository>,
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn IdGenerator>,
}

impl DuplicateTodo {
    pub async fn execute(&self, caller: DbId, id: DbId) -> CoreResult<Todo> {
        let original = load_owned(self.todos.as_ref(), caller, id).await?;
        let copy = original.duplicate(self.ids.next_id(), self.clock.now());

        let created = self.todos.create(&copy).await?;
        tracing::debug!(source_id = %id, todo_id = %created.id, "Todo duplicated");
        Ok(created)
    }
}

/// Deleting a todo that no longer exists succeeds.
#[derive(Clone)]
pub struct DeleteTodo {
    pub todos: Arc<dyn TodoRepository>,
}

impl DeleteTodo {
    pub async fn execute(&self, caller: DbId, id: DbId) -> CoreResult<()> {
        let Some(todo) = self.todos.find_by_id(id).await? else {
            return Ok(());
        };
        ensure_owner(caller, &todo)?;

        self.todos.delete(id).await?;
        tracing::debug!(todo_id = %id, "Todo deleted");
        Ok(())
    }
}
