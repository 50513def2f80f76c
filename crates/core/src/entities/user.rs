use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::types::{DbId, Timestamp};
use crate::values::{Email, Password};

/// A registered account.
///
/// Holds the password only as its hash. Do not serialize this type to
/// clients directly; the HTTP layer maps it to a response DTO.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    /// IANA zone name, e.g. `Europe/Berlin`.
    pub timezone: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated input for [`User::new`].
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password: Password,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub timezone: String,
}

impl User {
    pub fn new(id: DbId, input: NewUser, now: Timestamp) -> CoreResult<Self> {
        let timezone = input.timezone.trim();
        if timezone.is_empty() {
            return Err(CoreError::MissingField("timezone"));
        }

        Ok(Self {
            id,
            email: input.email.into_inner(),
            password_hash: input.password.into_hash(),
            name: input.name,
            avatar_url: input.avatar_url,
            timezone: timezone.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// The stored hash, ready for [`Password::verify`].
    pub fn password(&self) -> Password {
        Password::from_hash(self.password_hash.clone())
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("name", &self.name)
            .field("avatar_url", &self.avatar_url)
            .field("timezone", &self.timezone)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
