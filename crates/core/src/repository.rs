//! Storage-agnostic repository contracts.
//!
//! Lookups return `Ok(None)` (or an empty list) for missing rows so callers
//! can tell "no data" apart from a storage failure. Implementations must be
//! safe to share across tasks; use cases hold them as `Arc<dyn ...>`.
//! Dropping a returned future cancels the call.

use async_trait::async_trait;

use crate::entities::{Category, Tag, Todo, User};
use crate::error::CoreResult;
use crate::types::DbId;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. A duplicate email fails with `CoreError::Conflict`.
    async fn create(&self, user: &User) -> CoreResult<User>;

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<User>>;

    /// Exact match on the stored email.
    async fn find_by_email(&self, email: &str) -> CoreResult<Option<User>>;

    /// Replace the stored row. Fails with `CoreError::NotFound` if absent.
    async fn update(&self, user: &User) -> CoreResult<User>;

    /// Hard delete. Deleting a missing row is not an error.
    async fn delete(&self, id: DbId) -> CoreResult<()>;
}

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Insert the todo row and its tag associations as one atomic unit.
    async fn create(&self, todo: &Todo) -> CoreResult<Todo>;

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Todo>>;

    /// All todos owned by `owner_id`, in storage order.
    async fn find_all_by_owner(&self, owner_id: DbId) -> CoreResult<Vec<Todo>>;

    /// Replace the todo row and reconcile its tag associations, writing only
    /// the added and removed association rows. Atomic. Fails with
    /// `CoreError::NotFound` if the todo does not exist.
    async fn update(&self, todo: &Todo) -> CoreResult<Todo>;

    /// Hard delete, together with the todo's associations.
    async fn delete(&self, id: DbId) -> CoreResult<()>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: &Category) -> CoreResult<Category>;

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Category>>;

    async fn find_all_by_owner(&self, owner_id: DbId) -> CoreResult<Vec<Category>>;

    async fn update(&self, category: &Category) -> CoreResult<Category>;

    /// Hard delete. Todos referencing the category lose the reference.
    async fn delete(&self, id: DbId) -> CoreResult<()>;
}

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn create(&self, tag: &Tag) -> CoreResult<Tag>;

    async fn find_by_id(&self, id: DbId) -> CoreResult<Option<Tag>>;

    async fn find_all_by_owner(&self, owner_id: DbId) -> CoreResult<Vec<Tag>>;

    /// Exact-name lookup scoped to one owner.
    async fn find_by_name_for_owner(&self, owner_id: DbId, name: &str)
        -> CoreResult<Option<Tag>>;

    async fn update(&self, tag: &Tag) -> CoreResult<Tag>;

    /// Hard delete, together with every association to the tag.
    async fn delete(&self, id: DbId) -> CoreResult<()>;
}
