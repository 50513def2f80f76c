//! Account registration, login and lookup.

use std::sync::Arc;

use chrono::Duration;

use crate::auth::jwt::TokenService;
use crate::clock::Clock;
use crate::entities::{NewUser, User};
use crate::error::{CoreError, CoreResult};
use crate::ids::IdGenerator;
use crate::repository::UserRepository;
use crate::types::{DbId, Timestamp};
use crate::values::{Email, Password};

/// Default lifetime of a login session.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Account rules fixed at startup.
#[derive(Debug, Clone, Copy)]
pub struct AccountPolicy {
    /// Lowercase emails before storing and before login lookup. When off,
    /// `Ada@x.io` and `ada@x.io` are distinct accounts.
    pub normalize_email: bool,
    pub session_ttl: Duration,
}

impl Default for AccountPolicy {
    fn default() -> Self {
        Self {
            normalize_email: true,
            session_ttl: Duration::hours(DEFAULT_SESSION_TTL_HOURS),
        }
    }
}

impl AccountPolicy {
    fn canonical_email(&self, email: Email) -> Email {
        if self.normalize_email {
            email.normalized()
        } else {
            email
        }
    }
}

/// Raw registration input.
#[derive(Debug, Clone)]
pub struct RegisterUserInput {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub timezone: String,
    pub avatar_url: Option<String>,
}

/// A freshly issued login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: DbId,
    pub expires_at: Timestamp,
}

#[derive(Clone)]
pub struct RegisterUser {
    pub users: Arc<dyn UserRepository>,
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn IdGenerator>,
    pub policy: AccountPolicy,
}

impl RegisterUser {
    pub async fn execute(&self, input: RegisterUserInput) -> CoreResult<User> {
        let email = self.policy.canonical_email(Email::new(&input.email)?);
        if input.timezone.trim().is_empty() {
            return Err(CoreError::MissingField("timezone"));
        }

        // Argon2 is CPU-bound.
        let plain = input.password;
        let password = tokio::task::spawn_blocking(move || Password::new(&plain))
            .await
            .map_err(|e| CoreError::Internal(format!("Password hashing task failed: {e}")))??;

        if self.users.find_by_email(email.as_str()).await?.is_some() {
            return Err(CoreError::Conflict(format!(
                "Email '{}' is already registered",
                email.as_str()
            )));
        }

        let user = User::new(
            self.ids.next_id(),
            NewUser {
                email,
                password,
                name: input.name,
                avatar_url: input.avatar_url,
                timezone: input.timezone,
            },
            self.clock.now(),
        )?;
        let created = self.users.create(&user).await?;

        tracing::debug!(user_id = %created.id, "User registered");
        Ok(created)
    }
}

#[derive(Clone)]
pub struct LoginUser {
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub clock: Arc<dyn Clock>,
    pub policy: AccountPolicy,
}

impl LoginUser {
    /// Every failure short of a storage error is reported as
    /// [`CoreError::InvalidCredentials`].
    pub async fn execute(&self, email: &str, password: &str) -> CoreResult<Session> {
        let Ok(email) = Email::new(email) else {
            return Err(CoreError::InvalidCredentials);
        };
        let email = self.policy.canonical_email(email);

        let user = self.users.find_by_email(email.as_str()).await?;
        if user.is_none() {
            tracing::debug!("Login attempt for unknown email");
        }

        // Unknown accounts are checked against a decoy so timing stays uniform.
        let stored = user.as_ref().map(User::password);
        let candidate = password.to_string();
        let matches = tokio::task::spawn_blocking(move || {
            stored.unwrap_or_else(Password::decoy).verify(&candidate)
        })
            .await
            .map_err(|e| CoreError::Internal(format!("Password check task failed: {e}")))?;
        let Some(user) = user else {
            return Err(CoreError::InvalidCredentials);
        };
        if !matches {
            tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
            return Err(CoreError::InvalidCredentials);
        }

        let ttl = self.policy.session_ttl;
        let expires_at = self
            .clock
            .now()
            .checked_add_signed(ttl)
            .ok_or_else(|| CoreError::Validation("Session lifetime is out of range".into()))?;
        let token = self.tokens.generate_token(user.id, ttl)?;

        tracing::debug!(user_id = %user.id, "User logged in");
        Ok(Session {
            token,
            user_id: user.id,
            expires_at,
        })
    }
}

#[derive(Clone)]
pub struct FindUserById {
    pub users: Arc<dyn UserRepository>,
}

impl FindUserById {
    pub async fn execute(&self, id: DbId) -> CoreResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found("User", id))
    }
}
