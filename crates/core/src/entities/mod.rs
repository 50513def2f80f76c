//! Domain entities.
//!
//! Constructors enforce creation invariants and stamp `created_at` /
//! `updated_at` from the caller-supplied instant. Later mutation happens in
//! the owning use case, which refreshes `updated_at`.

pub mod category;
pub mod tag;
pub mod todo;
pub mod user;

pub use category::Category;
pub use tag::Tag;
pub use todo::{NewTodo, Todo, TodoStatus};
pub use user::{NewUser, User};

use crate::error::{CoreError, CoreResult};
use crate::types::DbId;

/// Reject the nil UUID as an owner id.
pub(crate) fn require_owner(user_id: DbId) -> CoreResult<()> {
    if user_id.is_nil() {
        return Err(CoreError::MissingField("user_id"));
    }
    Ok(())
}

/// Trim `raw` and reject it when nothing is left.
pub(crate) fn required_name(raw: &str, field: &'static str) -> CoreResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}
