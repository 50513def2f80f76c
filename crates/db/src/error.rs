//! Translation of `sqlx` failures into domain errors.

use todo_core::error::CoreError;

/// PostgreSQL `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Map a sqlx error to a [`CoreError`].
///
/// Unique violations on constraints named `uq_*` become
/// [`CoreError::Conflict`]; everything else is an opaque storage failure.
pub fn into_core(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return CoreError::Conflict(conflict_message(constraint));
            }
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::storage(err)
}

fn conflict_message(constraint: &str) -> String {
    match constraint {
        "uq_users_email" => "Email is already registered".to_string(),
        "uq_tags_user_name" => "Tag name already exists".to_string(),
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn non_database_errors_are_storage_failures() {
        assert_matches!(into_core(sqlx::Error::PoolTimedOut), CoreError::Storage(_));
        assert_matches!(into_core(sqlx::Error::RowNotFound), CoreError::Storage(_));
    }

    #[test]
    fn known_constraints_get_readable_messages() {
        assert_eq!(conflict_message("uq_users_email"), "Email is already registered");
        assert!(conflict_message("uq_other").ends_with("uq_other"));
    }
}
