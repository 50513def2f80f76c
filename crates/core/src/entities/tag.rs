use serde::Serialize;

use super::{require_owner, required_name};
use crate::error::CoreResult;
use crate::types::{DbId, Timestamp};

/// A user-owned label that can be attached to many todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Tag {
    pub fn new(id: DbId, user_id: DbId, name: &str, now: Timestamp) -> CoreResult<Self> {
        require_owner(user_id)?;
        Ok(Self {
            id,
            name: Self::validate_name(name)?,
            user_id,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn validate_name(raw: &str) -> CoreResult<String> {
        required_name(raw, "Tag name")
    }
}
