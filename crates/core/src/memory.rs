//! In-process storage backend.
//!
//! [`MemoryStore`] implements every repository contract over a single
//! `tokio::sync::RwLock`. It mirrors the relational constraints of the
//! Postgres schema (unique emails and per-owner tag names, `ON DELETE SET NULL` for categories,
//! cascading tag associations) so use cases behave the same on both
//! backends. Used for local runs without `DATABASE_URL` and in tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::associations::TagDelta;
use crate::entities::{Category, Tag, Todo, User};
use crate::error::{CoreError, CoreResult};
use crate::repository::{CategoryRepository, TagRepository, TodoRepository, UserRepository};
use crate::types::DbId;

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    /// Todo rows are stored without their tag ids; see `todo_tags`.
    todos: Vec<Todo>,
    categories: Vec<Category>,
    tags: Vec<Tag>,
    /// `(todo_id, tag_id)` association rows.
    todo_tags: Vec<(DbId, DbId)>,
    association_writes: u64,
}

impl Tables {
    /// Mirrors `uq_tags_user_name`.
    fn ensure_tag_name_free(&self, tag: &Tag) -> CoreResult<()> {
        let taken = self
            .tags
            .iter()
            .any(|t| t.id != tag.id && t.user_id == tag.user_id && t.name == tag.name);
        if taken {
            return Err(CoreError::Conflict(format!(
                "Tag '{}' already exists",
                tag.name
            )));
        }
        Ok(())
    }

    fn tag_ids_for(&self, todo_id: DbId) -> Vec<DbId> {
        let mut ids: Vec<DbId> = self
            .todo_tags
            .iter()
            .filter(|(todo, _)| *todo == todo_id)
            .map(|(_, tag)| *tag)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn hydrate(&self, row: &Todo) -> Todo {
        Todo {
            tag_ids: self.tag_ids_for(row.id),
            ..row.clone()
        }
    }

    fn apply_delta(&mut self, todo_id: DbId, delta: &TagDelta) {
        self.todo_tags
            .retain(|(todo, tag)| *todo != todo_id || !delta.removed.contains(tag));
        self.todo_tags
            .extend(delta.added.iter().map(|tag| (todo_id, *tag)));
        self.association_writes += delta.len() as u64;
    }
}

fn stripped(todo: &Todo) -> Todo {
    Todo {
        tag_ids: Vec::new(),
        ..todo.clone()
    }
}

/// Thread-safe in-memory implementation of all repository traits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total association rows inserted or deleted since creation.
    pub async fn association_writes(&self) -> u64 {
        self.tables.read().await.association_writes
    }

    /// Number of stored todo rows, across all owners.
    pub async fn todo_count(&self) -> usize {
        self.tables.read().await.todos.len()
    }

    /// Number of stored association rows, across all todos.
    pub async fn association_count(&self) -> usize {
        self.tables.read().await.todo_tags.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &User) -> CoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(CoreError::Conflict(format!(
                "Email '{}' is already registered",
                user.email
            )));
        }
        tables.users.push(user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> CoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn update(&self, user: &User) -> CoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .iter()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(CoreError::Conflict(format!(
                "Email '{}' is already registered",
                user.email
            )));
        }
        let slot = tables
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| CoreError::not_found("User", user.id))?;
        *slot = user.clone();
        Ok(user.clone())
    }

    async fn delete(&self, id: DbId) -> CoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.users.retain(|u| u.id != id);
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for MemoryStore {
    async fn create(&self, todo: &Todo) -> CoreResult<Todo> {
        let mut tables = self.tables.write().await;
        if tables.todos.iter().any(|t| t.id == todo.id) {
            return Err(CoreError::Conflict(format!("Todo {} already exists", todo.id)));
        }
        tables.todos.push(stripped(todo));
        let delta = TagDelta::between(&[], &todo.tag_ids);
        tables.apply_delta(todo.id, &delta);

        let row = tables.todos.last().map(|t| tables.hydrate(t));
        row.ok_or_else(|| CoreError::Internal("Inserted todo vanished".into()))
    }

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Todo>> {
        let tables = self.tables.read().await;
        Ok(tables
            .todos
            .iter()
            .find(|t| t.id == id)
            .map(|t| tables.hydrate(t)))
    }

    async fn find_all_by_owner(&self, owner_id: DbId) -> CoreResult<Vec<Todo>> {
        let tables = self.tables.read().await;
        Ok(tables
            .todos
            .iter()
            .filter(|t| t.user_id == owner_id)
            .map(|t| tables.hydrate(t))
            .collect())
    }

    async fn update(&self, todo: &Todo) -> CoreResult<Todo> {
        let mut tables = self.tables.write().await;
        let index = tables
            .todos
            .iter()
            .position(|t| t.id == todo.id)
            .ok_or_else(|| CoreError::not_found("Todo", todo.id))?;

        let current = tables.tag_ids_for(todo.id);
        let delta = TagDelta::between(&current, &todo.tag_ids);
        tables.todos[index] = stripped(todo);
        tables.apply_delta(todo.id, &delta);

        Ok(tables.hydrate(&tables.todos[index]))
    }

    async fn delete(&self, id: DbId) -> CoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.todos.retain(|t| t.id != id);
        tables.todo_tags.retain(|(todo, _)| *todo != id);
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn create(&self, category: &Category) -> CoreResult<Category> {
        let mut tables = self.tables.write().await;
        tables.categories.push(category.clone());
        Ok(category.clone())
    }

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_all_by_owner(&self, owner_id: DbId) -> CoreResult<Vec<Category>> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .iter()
            .filter(|c| c.user_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update(&self, category: &Category) -> CoreResult<Category> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or_else(|| CoreError::not_found("Category", category.id))?;
        *slot = category.clone();
        Ok(category.clone())
    }

    async fn delete(&self, id: DbId) -> CoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.categories.retain(|c| c.id != id);
        for todo in tables.todos.iter_mut() {
            if todo.category_id == Some(id) {
                todo.category_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn create(&self, tag: &Tag) -> CoreResult<Tag> {
        let mut tables = self.tables.write().await;
        tables.ensure_tag_name_free(tag)?;
        tables.tags.push(tag.clone());
        Ok(tag.clone())
    }

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Tag>> {
        let tables = self.tables.read().await;
        Ok(tables.tags.iter().find(|t| t.id == id).cloned())
    }

    async fn find_all_by_owner(&self, owner_id: DbId) -> CoreResult<Vec<Tag>> {
        let tables = self.tables.read().await;
        Ok(tables
            .tags
            .iter()
            .filter(|t| t.user_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_by_name_for_owner(
        &self,
        owner_id: DbId,
        name: &str,
    ) -> CoreResult<Option<Tag>> {
        let tables = self.tables.read().await;
        Ok(tables
            .tags
            .iter()
            .find(|t| t.user_id == owner_id && t.name == name)
            .cloned())
    }

    async fn update(&self, tag: &Tag) -> CoreResult<Tag> {
        let mut tables = self.tables.write().await;
        tables.ensure_tag_name_free(tag)?;
        let slot = tables
            .tags
            .iter_mut()
            .find(|t| t.id == tag.id)
            .ok_or_else(|| CoreError::not_found("Tag", tag.id))?;
        *slot = tag.clone();
        Ok(tag.clone())
    }

    async fn delete(&self, id: DbId) -> CoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.tags.retain(|t| t.id != id);
        tables.todo_tags.retain(|(_, tag)| *tag != id);
        Ok(())
    }
}
