use crate::error::{CoreError, CoreResult};

/// Maximum title length, in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// A todo title: 1 to [`MAX_TITLE_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    pub fn new(raw: &str) -> CoreResult<Self> {
        if raw.trim().is_empty() {
            return Err(CoreError::Validation("Title cannot be empty".into()));
        }
        if raw.chars().count() > MAX_TITLE_CHARS {
            return Err(CoreError::Validation(format!(
                "Title cannot exceed {MAX_TITLE_CHARS} characters"
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
