use std::fmt::Display;

use hrdesk_core::AppError;

/// Postgres SQLSTATE for an undefined table.
const UNDEFINED_TABLE: &str = "42P01";

/// Message fragments reported when a table or bucket was never provisioned.
const NOT_PROVISIONED_MARKERS: &[&str] = &[
    UNDEFINED_TABLE,
    "schema cache",
    "Bucket not found",
    "bucket not found",
];

/// Maps a raw backend failure message to an application error.
///
/// Missing tables and buckets become [`AppError::NotProvisioned`] so callers
/// can point the operator at the setup step; everything else is surfaced as
/// [`AppError::Internal`] with the raw message.
pub fn classify_backend_error(action: &str, message: impl Display) -> AppError {
    let message = message.to_string();
    if is_not_provisioned(message.as_str()) {
        return AppError::NotProvisioned(format!("failed to {action}: {message}"));
    }

    AppError::Internal(format!("failed to {action}: {message}"))
}

/// Maps a `sqlx` error, including the SQLSTATE code when the database sent one.
pub(crate) fn sqlx_error(action: &str, error: sqlx::Error) -> AppError {
    let code = match &error {
        sqlx::Error::Database(database_error) => {
            database_error.code().map(|code| code.into_owned())
        }
        _ => None,
    };

    match code {
        Some(code) => classify_backend_error(action, format!("{error} (code {code})")),
        None => classify_backend_error(action, error),
    }
}

fn is_not_provisioned(message: &str) -> bool {
    if NOT_PROVISIONED_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
    {
        return true;
    }

    message
        .find("relation \"")
        .is_some_and(|start| message[start..].contains("\" does not exist"))
}

#[cfg(test)]
mod tests {
    use hrdesk_core::AppError;

    use super::classify_backend_error;

    #[test]
    fn missing_relation_requires_setup() {
        let error = classify_backend_error(
            "list tasks",
            r#"error returned from database: relation "tasks" does not exist"#,
        );

        assert!(matches!(error, AppError::NotProvisioned(_)));
    }

    #[test]
    fn undefined_table_code_requires_setup() {
        let error = classify_backend_error("list grades", "query failed (code 42P01)");

        assert!(error.requires_setup());
    }

    #[test]
    fn storage_markers_require_setup() {
        for message in [
            "Could not find the table 'public.tasks' in the schema cache",
            "Bucket not found",
            "storage error: bucket not found",
        ] {
            assert!(classify_backend_error("upload attachment", message).requires_setup());
        }
    }

    #[test]
    fn other_failures_keep_raw_message() {
        let error = classify_backend_error(
            "update task",
            "duplicate key value violates unique constraint",
        );

        let AppError::Internal(message) = error else {
            panic!("unexpected error category");
        };
        assert_eq!(
            message,
            "failed to update task: duplicate key value violates unique constraint"
        );
    }

    #[test]
    fn relation_must_be_followed_by_does_not_exist() {
        let error = classify_backend_error(
            "delete task",
            r#"update on relation "tasks" violates foreign key constraint"#,
        );

        assert!(!error.requires_setup());
    }
}
