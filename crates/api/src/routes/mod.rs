pub mod auth;
pub mod categories;
pub mod health;
pub mod tags;
pub mod todos;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                    register (public)
/// /auth/login                       login (public)
/// /auth/logout                      logout (requires auth)
/// /auth/me                          current user (requires auth)
///
/// /todos                            list, create
/// /todos/{id}                       get, update, delete
/// /todos/{id}/status                set status
/// /todos/{id}/duplicate             duplicate
///
/// /categories                       list, create
/// /categories/{id}                  update, delete
///
/// /tags                             list, create
/// /tags/{id}                        update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/todos", todos::router())
        .nest("/categories", categories::router())
        .nest("/tags", tags::router())
}
