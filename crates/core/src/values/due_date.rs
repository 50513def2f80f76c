use crate::error::{CoreError, CoreResult};
use crate::types::Timestamp;

/// A due date that was not in the past when it was validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueDate(Timestamp);

impl DueDate {
    /// Validate `at` against `now`. The boundary instant itself is accepted.
    pub fn new(at: Timestamp, now: Timestamp) -> CoreResult<Self> {
        if at < now {
            return Err(CoreError::Validation(
                "Due date cannot be in the past".into(),
            ));
        }
        Ok(Self(at))
    }

    pub fn value(&self) -> Timestamp {
        self.0
    }
}
