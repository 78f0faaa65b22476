//! Shared primitives for all Rust crates in hrdesk.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::UserIdentity;

/// Result type used across hrdesk crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string. Surrounding whitespace is trimmed.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::fmt::Display for NonEmptyString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Normalizes an optional free-text value: trims it and maps blank input to `None`.
#[must_use]
pub fn trimmed_non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim().to_owned();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// User is not authenticated or not allowed to access a resource.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A backend table or storage bucket has not been provisioned yet.
    #[error("backend object not provisioned: {0}")]
    NotProvisioned(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns whether the error asks the operator to run the setup step.
    #[must_use]
    pub fn requires_setup(&self) -> bool {
        matches!(self, Self::NotProvisioned(_))
    }

    /// Prefixes the error message with context while keeping the category.
    #[must_use]
    pub fn with_context(self, context: &str) -> Self {
        match self {
            Self::Validation(message) => Self::Validation(format!("{context}: {message}")),
            Self::NotFound(message) => Self::NotFound(format!("{context}: {message}")),
            Self::Conflict(message) => Self::Conflict(format!("{context}: {message}")),
            Self::Unauthorized(message) => Self::Unauthorized(format!("{context}: {message}")),
            Self::Forbidden(message) => Self::Forbidden(format!("{context}: {message}")),
            Self::NotProvisioned(message) => {
                Self::NotProvisioned(format!("{context}: {message}"))
            }
            Self::Internal(message) => Self::Internal(format!("{context}: {message}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, NonEmptyString, trimmed_non_empty};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn non_empty_string_trims_input() {
        let value = NonEmptyString::new("  Phòng Kế toán ");
        assert_eq!(
            value.map(String::from).unwrap_or_default(),
            "Phòng Kế toán"
        );
    }

    #[test]
    fn blank_optional_text_becomes_none() {
        assert_eq!(trimmed_non_empty(Some("   ".to_owned())), None);
        assert_eq!(
            trimmed_non_empty(Some(" Nhóm A ".to_owned())),
            Some("Nhóm A".to_owned())
        );
    }

    #[test]
    fn only_not_provisioned_requires_setup() {
        assert!(AppError::NotProvisioned("tasks".to_owned()).requires_setup());
        assert!(!AppError::Internal("boom".to_owned()).requires_setup());
    }

    #[test]
    fn context_keeps_error_category() {
        let error = AppError::NotProvisioned("bucket not found".to_owned())
            .with_context("task 'abc' was saved without assignments");

        assert!(error.requires_setup());
        assert_eq!(
            error.to_string(),
            "backend object not provisioned: task 'abc' was saved without assignments: bucket not found"
        );
    }
}
