use hrdesk_core::AppError;

pub mod grading;
pub mod health;
pub mod profile;
pub mod settings;
pub mod tasks;

#[cfg(test)]
mod test_support;

/// Whether a failed call reached the backend, as opposed to being rejected
/// by validation or policy first.
fn is_backend_failure(error: &AppError) -> bool {
    matches!(
        error,
        AppError::Internal(_) | AppError::NotProvisioned(_) | AppError::Conflict(_)
    )
}
