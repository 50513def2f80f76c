//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use todo_core::usecases::{CategoryChanges, CreateCategoryInput};

use super::path_id;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub color: String,
    pub description: Option<String>,
}

/// Omitted fields are left unchanged; an empty `description` clears it.
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

/// POST /api/v1/categories
pub async fn create_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    let category = state
        .use_cases
        .create_category
        .execute(
            auth.user_id,
            CreateCategoryInput {
                name: input.name,
                color: input.color,
                description: input.description,
            },
        )
        .await?;

    tracing::info!(category_id = %category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/categories
pub async fn list_categories(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = state
        .use_cases
        .list_categories
        .execute(auth.user_id)
        .await?;
    Ok(Json(DataResponse { data: categories }))
}

/// PUT /api/v1/categories/{id}
pub async fn update_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    let id = path_id(&id, "category id")?;
    let category = state
        .use_cases
        .update_category
        .execute(
            auth.user_id,
            id,
            CategoryChanges {
                name: input.name,
                color: input.color,
                description: input.description,
            },
        )
        .await?;

    tracing::info!(category_id = %category.id, "Category updated");
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = path_id(&id, "category id")?;
    state
        .use_cases
        .delete_category
        .execute(auth.user_id, id)
        .await?;

    tracing::info!(category_id = %id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
