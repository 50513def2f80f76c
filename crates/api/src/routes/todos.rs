use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::todos;
use crate::state::AppState;

/// Todo routes mounted at `/todos`.
///
/// ```text
/// GET    /                  -> list_todos
/// POST   /                  -> create_todo
/// GET    /{id}              -> get_todo
/// PUT    /{id}              -> update_todo
/// DELETE /{id}              -> delete_todo
/// PUT    /{id}/status       -> update_status
/// POST   /{id}/duplicate    -> duplicate_todo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/{id}",
            get(todos::get_todo)
                .put(todos::update_todo)
                .delete(todos::delete_todo),
        )
        .route("/{id}/status", put(todos::update_status))
        .route("/{id}/duplicate", post(todos::duplicate_todo))
}
