//! The single ownership guard shared by every mutating use case.

use crate::entities::{Category, Tag, Todo};
use crate::error::{CoreError, CoreResult};
use crate::types::DbId;

/// A resource that belongs to exactly one user.
pub trait Owned {
    /// Human-readable entity name used in error messages.
    const ENTITY: &'static str;

    fn id(&self) -> DbId;
    fn owner_id(&self) -> DbId;
}

impl Owned for Todo {
    const ENTITY: &'static str = "Todo";

    fn id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> DbId {
        self.user_id
    }
}

impl Owned for Category {
    const ENTITY: &'static str = "Category";

    fn id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> DbId {
        self.user_id
    }
}

impl Owned for Tag {
    const ENTITY: &'static str = "Tag";

    fn id(&self) -> DbId {
        self.id
    }

    fn owner_id(&self) -> DbId {
        self.user_id
    }
}

/// Fail with [`CoreError::Forbidden`] unless `caller` owns `resource`.
pub fn ensure_owner<R: Owned>(caller: DbId, resource: &R) -> CoreResult<()> {
    if resource.owner_id() != caller {
        return Err(CoreError::Forbidden(format!(
            "{} {} belongs to another user",
            R::ENTITY,
            resource.id()
        )));
    }
    Ok(())
}
