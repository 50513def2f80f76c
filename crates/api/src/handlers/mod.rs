pub mod auth;
pub mod categories;
pub mod tags;
pub mod todos;

use todo_core::types::DbId;
use todo_core::values::Identifier;

use crate::error::AppResult;

/// Parse a path segment as an entity id, naming `field` in the 400 message.
pub(crate) fn path_id(raw: &str, field: &str) -> AppResult<DbId> {
    Ok(Identifier::parse(raw, field)?.value())
}
