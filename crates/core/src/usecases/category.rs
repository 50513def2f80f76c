use std::sync::Arc;

use crate::clock::Clock;
use crate::entities::Category;
use crate::error::{CoreError, CoreResult};
use crate::ids::IdGenerator;
use crate::ownership::ensure_owner;
use crate::repository::CategoryRepository;
use crate::types::DbId;

async fn load_owned(
    categories: &dyn CategoryRepository,
    caller: DbId,
    id: DbId,
) -> CoreResult<Category> {
    let category = categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Category", id))?;
    ensure_owner(caller, &category)?;
    Ok(category)
}

#[derive(Debug, Clone, Default)]
pub struct CreateCategoryInput {
    pub name: String,
    pub color: String,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct CreateCategory {
    pub categories: Arc<dyn CategoryRepository>,
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn IdGenerator>,
}

impl CreateCategory {
    pub async fn execute(&self, caller: DbId, input: CreateCategoryInput) -> CoreResult<Category> {
        let category = Category::new(
            self.ids.next_id(),
            caller,
            &input.name,
            &input.color,
            input.description,
            self.clock.now(),
        )?;
        let created = self.categories.create(&category).await?;

        tracing::debug!(category_id = %created.id, name = %created.name, "Category created");
        Ok(created)
    }
}

#[derive(Clone)]
pub struct ListCategories {
    pub categories: Arc<dyn CategoryRepository>,
}

impl ListCategories {
    pub async fn execute(&self, caller: DbId) -> CoreResult<Vec<Category>> {
        self.categories.find_all_by_owner(caller).await
    }
}

/// Partial update for [`UpdateCategory`]. An empty `description` clears it.
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct UpdateCategory {
    pub categories: Arc<dyn CategoryRepository>,
    pub clock: Arc<dyn Clock>,
}

impl UpdateCategory {
    pub async fn execute(
        &self,
        caller: DbId,
        id: DbId,
        changes: CategoryChanges,
    ) -> CoreResult<Category> {
        let mut category = load_owned(self.categories.as_ref(), caller, id).await?;

        if let Some(name) = changes.name {
            category.name = Category::validate_name(&name)?;
        }
        if let Some(color) = changes.color {
            category.color = color;
        }
        if let Some(description) = changes.description {
            category.description = (!description.is_empty()).then_some(description);
        }
        category.updated_at = self.clock.now();

        let updated = self.categories.update(&category).await?;
        tracing::debug!(category_id = %updated.id, "Category updated");
        Ok(updated)
    }
}

/// Deleting a category detaches it from its todos. A missing category is
/// not an error.
#[derive(Clone)]
pub struct DeleteCategory {
    pub categories: Arc<dyn CategoryRepository>,
}

impl DeleteCategory {
    pub async fn execute(&self, caller: DbId, id: DbId) -> CoreResult<()> {
        let Some(category) = self.categories.find_by_id(id).await? else {
            return Ok(());
        };
        ensure_owner(caller, &category)?;

        self.categories.delete(id).await?;
        tracing::debug!(category_id = %id, "Category deleted");
        Ok(())
    }
}
