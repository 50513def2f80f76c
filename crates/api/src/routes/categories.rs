use axum::routing::{get, put};
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Category routes mounted at `/categories`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
}
