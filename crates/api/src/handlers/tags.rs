//! Handlers for the `/tags` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use super::path_id;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for both `POST /tags` and `PUT /tags/{id}`.
#[derive(Debug, Deserialize)]
pub struct TagRequest {
    pub name: String,
}

/// POST /api/v1/tags
pub async fn create_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<TagRequest>,
) -> AppResult<impl IntoResponse> {
    let tag = state
        .use_cases
        .create_tag
        .execute(auth.user_id, &input.name)
        .await?;

    tracing::info!(tag_id = %tag.id, name = %tag.name, "Tag created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

/// GET /api/v1/tags
pub async fn list_tags(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let tags = state.use_cases.list_tags.execute(auth.user_id).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// PUT /api/v1/tags/{id}
pub async fn update_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<TagRequest>,
) -> AppResult<impl IntoResponse> {
    let id = path_id(&id, "tag id")?;
    let tag = state
        .use_cases
        .update_tag
        .execute(auth.user_id, id, &input.name)
        .await?;

    tracing::info!(tag_id = %tag.id, "Tag updated");
    Ok(Json(DataResponse { data: tag }))
}

/// DELETE /api/v1/tags/{id}
pub async fn delete_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = path_id(&id, "tag id")?;
    state.use_cases.delete_tag.execute(auth.user_id, id).await?;

    tracing::info!(tag_id = %id, "Tag deleted");
    Ok(StatusCode::NO_CONTENT)
}
