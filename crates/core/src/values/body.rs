use crate::error::{CoreError, CoreResult};

/// Maximum body length, in characters.
pub const MAX_BODY_CHARS: usize = 1000;

/// Free-form todo notes. Empty is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body(String);

impl Body {
    pub fn new(raw: &str) -> CoreResult<Self> {
        if raw.chars().count() > MAX_BODY_CHARS {
            return Err(CoreError::Validation(format!(
                "Body cannot exceed {MAX_BODY_CHARS} characters"
            )));
        }
        Ok(Self(raw.to_string()))
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
    fn empty_body_is_allowed() {
        assert_eq!(Body::new("").unwrap().as_str(), "");
    }

    #[test]
    fn length_limit() {
        assert!(Body::new(&"b".repeat(MAX_BODY_CHARS)).is_ok());
        assert!(Body::new(&"b".repeat(MAX_BODY_CHARS + 1)).is_err());
    }
}
