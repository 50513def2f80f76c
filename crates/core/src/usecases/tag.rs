//! Tag use cases. Tag names are unique per owner.

use std::sync::Arc;

use crate::clock::Clock;
use crate::entities::Tag;
use crate::error::{CoreError, CoreResult};
use crate::ids::IdGenerator;
use crate::ownership::ensure_owner;
use crate::repository::TagRepository;
use crate::types::DbId;

/// Fail with [`CoreError::Conflict`] if `owner` already has another tag
/// called `name`.
async fn ensure_name_free(
    tags: &dyn TagRepository,
    owner: DbId,
    name: &str,
    except: Option<DbId>,
) -> CoreResult<()> {
    match tags.find_by_name_for_owner(owner, name).await? {
        Some(existing) if Some(existing.id) != except => Err(CoreError::Conflict(format!(
            "Tag '{name}' already exists"
        ))),
        _ => Ok(()),
    }
}

#[derive(Clone)]
pub struct CreateTag {
    pub tags: Arc<dyn TagRepository>,
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn IdGenerator>,
}

impl CreateTag {
    pub async fn execute(&self, caller: DbId, name: &str) -> CoreResult<Tag> {
        let tag = Tag::new(self.ids.next_id(), caller, name, self.clock.now())?;
        ensure_name_free(self.tags.as_ref(), caller, &tag.name, None).await?;

        let created = self.tags.create(&tag).await?;
        tracing::debug!(tag_id = %created.id, name = %created.name, "Tag created");
        Ok(created)
    }
}

#[derive(Clone)]
pub struct ListTags {
    pub tags: Arc<dyn TagRepository>,
}

impl ListTags {
    pub async fn execute(&self, caller: DbId) -> CoreResult<Vec<Tag>> {
        self.tags.find_all_by_owner(caller).await
    }
}

#[derive(Clone)]
pub struct UpdateTag {
    pub tags: Arc<dyn TagRepository>,
    pub clock: Arc<dyn Clock>,
}

impl UpdateTag {
    /// Rename a tag.
    pub async fn execute(&self, caller: DbId, id: DbId, name: &str) -> CoreResult<Tag> {
        let mut tag = self
            .tags
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Tag", id))?;
        ensure_owner(caller, &tag)?;

        let name = Tag::validate_name(name)?;
        ensure_name_free(self.tags.as_ref(), caller, &name, Some(id)).await?;
        tag.name = name;
        tag.updated_at = self.clock.now();

        let updated = self.tags.update(&tag).await?;
        tracing::debug!(tag_id = %updated.id, "Tag updated");
        Ok(updated)
    }
}

/// Deleting a tag removes it from every todo. A missing tag is not an error.
#[derive(Clone)]
pub struct DeleteTag {
    pub tags: Arc<dyn TagRepository>,
}

impl DeleteTag {
    pub async fn execute(&self, caller: DbId, id: DbId) -> CoreResult<()> {
        let Some(tag) = self.tags.find_by_id(id).await? else {
            return Ok(());
        };
        ensure_owner(caller, &tag)?;

        self.tags.delete(id).await?;
        tracing::debug!(tag_id = %id, "Tag deleted");
        Ok(())
    }
}
