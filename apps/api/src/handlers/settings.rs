use axum::Json;
use axum::extract::{Extension, Path, State};
use hrdesk_core::UserIdentity;
use tracing::warn;

use crate::dto::{
    PermissionRuleResponse, RoleAssignmentResponse, SetRoleOverrideRequest,
    TogglePermissionRequest,
};
use crate::error::ApiResult;
use crate::handlers::is_backend_failure;
use crate::state::AppState;

#[cfg(test)]
mod tests;

pub async fn list_role_assignments_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<RoleAssignmentResponse>>> {
    let entries = state
        .settings_service
        .list_role_assignments(&user)
        .await?
        .into_iter()
        .map(RoleAssignmentResponse::from)
        .collect();

    Ok(Json(entries))
}

pub async fn set_role_override_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(employee_code): Path<String>,
    Json(payload): Json<SetRoleOverrideRequest>,
) -> ApiResult<Json<RoleAssignmentResponse>> {
    let entry = state
        .settings_service
        .set_override(&user, employee_code.as_str(), payload.into_input()?)
        .await?;

    Ok(Json(RoleAssignmentResponse::from(entry)))
}

pub async fn clear_role_override_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(employee_code): Path<String>,
) -> ApiResult<Json<RoleAssignmentResponse>> {
    let entry = state
        .settings_service
        .clear_override(&user, employee_code.as_str())
        .await?;

    Ok(Json(RoleAssignmentResponse::from(entry)))
}

pub async fn permission_matrix_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<PermissionRuleResponse>>> {
    let grid = state
        .settings_service
        .permission_matrix(&user)
        .await?
        .into_iter()
        .map(PermissionRuleResponse::from)
        .collect();

    Ok(Json(grid))
}

pub async fn toggle_permission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<TogglePermissionRequest>,
) -> ApiResult<Json<PermissionRuleResponse>> {
    let (role_level, module, action) = payload.parse()?;
    let rule = state
        .settings_service
        .toggle_permission(&user, role_level, module, action)
        .await
        .inspect_err(|error| {
            if is_backend_failure(error) {
                warn!(
                    error = %error,
                    role_level = %role_level.as_str(),
                    module = %module.as_str(),
                    action = %action.as_str(),
                    "permission toggle reverted"
                );
            }
        })?;

    Ok(Json(PermissionRuleResponse::from(rule)))
}
