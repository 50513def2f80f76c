//! Identifier generation for new entities.

use uuid::Uuid;

use crate::types::DbId;

/// Produces globally unique identifiers.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> DbId;
}

/// Random (v4) UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidV4Generator;

impl IdGenerator for UuidV4Generator {
    fn next_id(&self) -> DbId {
        Uuid::new_v4()
    }
}
