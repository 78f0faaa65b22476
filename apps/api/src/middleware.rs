use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use hrdesk_core::{AppError, UserIdentity};

use crate::error::ApiResult;
use crate::state::AppState;

/// Resolves the caller from the header set by the upstream authentication proxy.
pub async fn require_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = identity_from_headers(request.headers(), state.identity_header.as_str())?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        check_same_origin(request.headers(), state.frontend_url.as_str())?;
    }

    Ok(next.run(request).await)
}

fn identity_from_headers(headers: &HeaderMap, header_name: &str) -> Result<UserIdentity, AppError> {
    let employee_code = headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Unauthorized(format!("missing '{header_name}' header")))?;

    Ok(UserIdentity::new(employee_code, employee_code, None))
}

fn check_same_origin(headers: &HeaderMap, allowed_origin: &str) -> Result<(), AppError> {
    if let Some(fetch_site) = headers.get("sec-fetch-site") {
        if fetch_site == HeaderValue::from_static("cross-site") {
            return Err(AppError::Unauthorized("cross-site request blocked".to_owned()));
        }
    }

    let origin = headers
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let referer = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if origin != allowed_origin && !referer.starts_with(allowed_origin) {
        return Err(AppError::Unauthorized("origin validation failed".to_owned()));
    }

    Ok(())
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}
