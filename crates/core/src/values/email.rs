use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CoreError, CoreResult};

/// Basic `local@domain.tld` shape; deliverability is not checked.
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// A syntactically plausible email address, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn new(raw: &str) -> CoreResult<Self> {
        let trimmed = raw.trim();
        if !EMAIL_RE.is_match(trimmed) {
            return Err(CoreError::Validation("Invalid email format".into()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Lowercased copy, used when emails are treated case-insensitively.
    pub fn normalized(&self) -> Self {
        Self(self.0.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_basic_addresses() {
        assert_eq!(Email::new("ada@example.com").unwrap().as_str(), "ada@example.com");
        assert_eq!(
            Email::new("  first.last+tag@sub.example.org ").unwrap().as_str(),
            "first.last+tag@sub.example.org"
        );
    }

    #[test]
    fn rejects_malformed() {
        for raw in ["", "plain", "no-at.example.com", "a@b", "a b@c.de", "a@@b.cd", "@b.cd"] {
            assert!(Email::new(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn normalization_lowercases() {
        let email = Email::new("Ada@Example.COM").unwrap();
        assert_eq!(email.as_str(), "Ada@Example.COM");
        assert_eq!(email.normalized().as_str(), "ada@example.com");
    }
}
