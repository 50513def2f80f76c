//! Handlers for the `/auth` resource (register, login, logout, me).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use todo_core::entities::User;
use todo_core::types::{DbId, Timestamp};
use todo_core::usecases::RegisterUserInput;

use crate::error::AppResult;
use crate::middleware::auth::{AuthUser, SESSION_COOKIE};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    #[serde(default)]
    pub timezone: String,
    pub avatar_url: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user. Never includes the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub timezone: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            avatar_url: user.avatar_url,
            timezone: user.timezone,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Successful login response. The token is also set as an HttpOnly cookie.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: Timestamp,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let user = state
        .use_cases
        .register_user
        .execute(RegisterUserInput {
            email: input.email,
            password: input.password,
            name: input.name,
            timezone: input.timezone,
            avatar_url: input.avatar_url,
        })
        .await?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns the session token in the body
/// and as the `token` cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let session = state
        .use_cases
        .login_user
        .execute(&input.email, &input.password)
        .await?;
    let user = state
        .use_cases
        .find_user_by_id
        .execute(session.user_id)
        .await?;

    let max_age = state.config.session_ttl_hours * 3600;
    let cookie = session_cookie(&session.token, max_age, state.config.secure_cookies);

    tracing::info!(user_id = %user.id, "User logged in");
    Ok((
        [(SET_COOKIE, cookie)],
        Json(DataResponse {
            data: LoginResponse {
                token: session.token,
                expires_at: session.expires_at,
                user: user.into(),
            },
        }),
    ))
}

/// POST /api/v1/auth/logout
///
/// Clears the session cookie. The token itself stays valid until it expires.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    tracing::info!(user_id = %auth.user_id, "User logged out");
    Ok((
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, session_cookie("", 0, state.config.secure_cookies))],
    ))
}

/// GET /api/v1/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<impl IntoResponse> {
    let user = state
        .use_cases
        .find_user_by_id
        .execute(auth.user_id)
        .await?;
    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `Set-Cookie` value for the session cookie. A zero `max_age` expires it.
fn session_cookie(token: &str, max_age: i64, secure: bool) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
