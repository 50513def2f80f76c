//! Self-validating wrappers around single input fields.
//!
//! Each value object has a validating constructor and an accessor; none of
//! them can be mutated after construction.

mod body;
mod due_date;
mod email;
mod identifier;
mod password;
mod title;

pub use body::{Body, MAX_BODY_CHARS};
pub use due_date::DueDate;
pub use email::Email;
pub use identifier::Identifier;
pub use password::Password;
pub use title::{Title, MAX_TITLE_CHARS};
