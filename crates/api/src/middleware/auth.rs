//! Session authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use todo_core::error::CoreError;
use todo_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Name of the cookie that carries the session token.
pub const SESSION_COOKIE: &str = "token";

/// Authenticated user extracted from the session token.
///
/// The token is read from `Authorization: Bearer <token>` first and from the
/// [`SESSION_COOKIE`] cookie otherwise.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %auth.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's id (from `claims.sub`).
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .or_else(|| cookie_value(parts, SESSION_COOKIE))
            .ok_or_else(|| CoreError::InvalidToken("Missing session token".into()))?;

        let claims = state.tokens.validate_token(&token)?;
        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

fn bearer_token(parts: &Parts) -> Result<Option<String>, AppError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = header
        .to_str()
        .map_err(|_| CoreError::InvalidToken("Malformed Authorization header".into()))?;
    let token = value.strip_prefix("Bearer ").ok_or_else(|| {
        CoreError::InvalidToken("Invalid Authorization format. Expected: Bearer <token>".into())
    })?;
    Ok(Some(token.trim().to_string()))
}

fn cookie_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}
