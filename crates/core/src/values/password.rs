use std::fmt;
use std::sync::LazyLock;

use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{CoreError, CoreResult};

/// Stand-in hash verified when a login names an unknown account, so both
/// failure paths pay for one Argon2 verification.
static DECOY: LazyLock<Password> = LazyLock::new(|| Password {
    hash: hash_password("decoy credentials").unwrap_or_default(),
});

/// A password held only as its salted Argon2id hash.
///
/// [`Password::new`] validates and hashes a plaintext candidate;
/// [`Password::from_hash`] rehydrates a stored hash for verification without
/// re-checking the length rule.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

impl Password {
    pub fn new(plain: &str) -> CoreResult<Self> {
        validate_password_strength(plain, MIN_PASSWORD_LENGTH).map_err(CoreError::Validation)?;
        let hash = hash_password(plain)
            .map_err(|e| CoreError::Internal(format!("Password hashing failed: {e}")))?;
        Ok(Self { hash })
    }

    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// A valid Argon2id hash that belongs to no account.
    pub fn decoy() -> Self {
        DECOY.clone()
    }

    /// The PHC string to persist.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn into_hash(self) -> String {
        self.hash
    }

    /// Whether `candidate` matches. A corrupt stored hash never matches.
    pub fn verify(&self, candidate: &str) -> bool {
        verify_password(candidate, &self.hash).unwrap_or(false)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn short_passwords_are_rejected() {
        assert_matches!(Password::new("12345"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn hash_is_not_the_plaintext() {
        let password = Password::new("hunter22").unwrap();
        assert_ne!(password.hash(), "hunter22");
        assert!(password.verify("hunter22"));
        assert!(!password.verify("hunter23"));
    }

    #[test]
    fn rehydrated_hash_verifies() {
        let stored = Password::new("s3cret!").unwrap().into_hash();
        let rehydrated = Password::from_hash(stored);
        assert!(rehydrated.verify("s3cret!"));
    }

    #[test]
    fn rehydration_skips_length_rule() {
        // A garbage hash is accepted as-is but never verifies.
        let rehydrated = Password::from_hash("abc");
        assert!(!rehydrated.verify("abc"));
    }

    #[test]
    fn decoy_is_a_real_argon2_hash() {
        let decoy = Password::decoy();
        assert!(decoy.hash().starts_with("$argon2id$"));
        assert!(!decoy.verify("hunter22"));
    }

    #[test]
    fn debug_output_is_redacted() {
        let password = Password::new("hunter22").unwrap();
        assert_eq!(format!("{password:?}"), "Password(<redacted>)");
    }
}
