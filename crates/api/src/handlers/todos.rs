//! Handlers for the `/todos` resource.
//!
//! All endpoints require authentication via [`AuthUser`] and only ever touch
//! the caller's own todos.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use todo_core::entities::TodoStatus;
use todo_core::ownership::ensure_owner;
use todo_core::types::Timestamp;
use todo_core::usecases::{CreateTodoInput, TodoChanges};

use super::path_id;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /todos`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub title: String,
    pub body: Option<String>,
    pub due_date: Option<Timestamp>,
    pub category_id: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

/// Request body for `PUT /todos/{id}`. Omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub due_date: Option<Timestamp>,
    pub status: Option<String>,
    pub category_id: Option<String>,
    pub tag_ids: Option<Vec<String>>,
}

/// Request body for `PUT /todos/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

/// POST /api/v1/todos
pub async fn create_todo(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTodoRequest>,
) -> AppResult<impl IntoResponse> {
    let todo = state
        .use_cases
        .create_todo
        .execute(
            auth.user_id,
            CreateTodoInput {
                title: input.title,
                body: input.body,
                due_date: input.due_date,
                category_id: input.category_id,
                tag_ids: input.tag_ids,
            },
        )
        .await?;

    tracing::info!(todo_id = %todo.id, user_id = %auth.user_id, "Todo created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: todo })))
}

/// GET /api/v1/todos
pub async fn list_todos(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let todos = state.use_cases.list_todos.execute(auth.user_id).await?;
    Ok(Json(DataResponse { data: todos }))
}

/// GET /api/v1/todos/{id}
pub async fn get_todo(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = path_id(&id, "todo id")?;
    let todo = state.use_cases.find_todo_by_id.execute(id).await?;
    ensure_owner(auth.user_id, &todo)?;

    Ok(Json(DataResponse { data: todo }))
}

/// PUT /api/v1/todos/{id}
pub async fn update_todo(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTodoRequest>,
) -> AppResult<impl IntoResponse> {
    let id = path_id(&id, "todo id")?;
    let status = input
        .status
        .as_deref()
        .map(str::parse::<TodoStatus>)
        .transpose()?;

    let todo = state
        .use_cases
        .update_todo
        .execute(
            auth.user_id,
            id,
            TodoChanges {
                title: input.title,
                body: input.body,
                due_date: input.due_date,
                status,
                category_id: input.category_id,
                tag_ids: input.tag_ids,
            },
        )
        .await?;

    tracing::info!(todo_id = %todo.id, "Todo updated");
    Ok(Json(DataResponse { data: todo }))
}

/// PUT /api/v1/todos/{id}/status
pub async fn update_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<StatusRequest>,
) -> AppResult<impl IntoResponse> {
    let id = path_id(&id, "todo id")?;
    let status: TodoStatus = input.status.parse()?;

    let todo = state
        .use_cases
        .toggle_todo_status
        .execute(auth.user_id, id, status)
        .await?;

    tracing::info!(todo_id = %todo.id, status = %todo.status, "Todo status changed");
    Ok(Json(DataResponse { data: todo }))
}

/// POST /api/v1/todos/{id}/duplicate
pub async fn duplicate_todo(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = path_id(&id, "todo id")?;
    let copy = state
        .use_cases
        .duplicate_todo
        .execute(auth.user_id, id)
        .await?;

    tracing::info!(source_id = %id, todo_id = %copy.id, "Todo duplicated");
    Ok((StatusCode::CREATED, Json(DataResponse { data: copy })))
}

/// DELETE /api/v1/todos/{id}
pub async fn delete_todo(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = path_id(&id, "todo id")?;
    state.use_cases.delete_todo.execute(auth.user_id, id).await?;

    tracing::info!(todo_id = %id, "Todo deleted");
    Ok(StatusCode::NO_CONTENT)
}
