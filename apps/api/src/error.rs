use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hrdesk_core::AppError;
use serde::Serialize;
use ts_rs::TS;

/// Command that provisions missing tables and the attachment bucket.
pub const SETUP_COMMAND: &str = "hrdesk-api migrate";

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    pub message: String,
    /// Present when the backend is missing a table or bucket.
    pub setup_hint: Option<String>,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotProvisioned(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn payload(&self) -> ErrorResponse {
        let setup_hint = self.0.requires_setup().then(|| {
            format!(
                "Backend tables or the attachment bucket are missing. Run `{SETUP_COMMAND}` and retry."
            )
        });

        ErrorResponse {
            message: self.0.to_string(),
            setup_hint,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.payload())).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
