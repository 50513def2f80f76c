use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::DbId;

/// A syntactically valid UUID identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier(DbId);

impl Identifier {
    /// Parse `raw`, naming `field` in the validation message.
    pub fn parse(raw: &str, field: &str) -> CoreResult<Self> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| CoreError::Validation(format!("{field} must be a valid UUID")))
    }

    pub fn value(&self) -> DbId {
        self.0
    }
}

impl From<Identifier> for DbId {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_uuid_text() {
        let id = Uuid::new_v4();
        assert_eq!(Identifier::parse(&id.to_string(), "id").unwrap().value(), id);
    }

    #[test]
    fn rejects_other_text() {
        let err = Identifier::parse("todo-42", "todo id").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: todo id must be a valid UUID");
    }
}
