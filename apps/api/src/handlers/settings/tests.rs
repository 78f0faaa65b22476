use axum::Json;
use axum::extract::{Extension, Path, State};
use hrdesk_core::AppError;

use super::{
    clear_role_override_handler, list_role_assignments_handler, permission_matrix_handler,
    set_role_override_handler, toggle_permission_handler,
};
use crate::dto::{SetRoleOverrideRequest, TogglePermissionRequest};
use crate::error::ApiError;
use crate::handlers::test_support::{ADMIN, DIRECTOR, SALES_STAFF, caller, seeded_state};

#[tokio::test]
async fn listing_puts_super_admin_first() {
    let (state, _repository) = seeded_state().await;

    let listed = list_role_assignments_handler(State(state), Extension(caller(DIRECTOR))).await;

    let Ok(Json(entries)) = listed else {
        panic!("director can view settings");
    };
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0].employee.employee_code, ADMIN);
    assert_eq!(entries[0].effective.role_level, "SUPER_ADMIN");
    assert_eq!(entries[0].inferred_role, "STAFF");
    assert_eq!(entries[1].employee.employee_code, DIRECTOR);
    assert_eq!(entries[1].effective.source, "inferred");
}

#[tokio::test]
async fn staff_cannot_open_settings() {
    let (state, _repository) = seeded_state().await;

    let listed = list_role_assignments_handler(State(state), Extension(caller(SALES_STAFF))).await;

    assert!(matches!(listed, Err(ApiError(AppError::Forbidden(_)))));
}

#[tokio::test]
async fn view_only_director_cannot_assign_roles() {
    let (state, _repository) = seeded_state().await;

    let result = set_role_override_handler(
        State(state),
        Extension(caller(DIRECTOR)),
        Path(SALES_STAFF.to_owned()),
        Json(SetRoleOverrideRequest {
            role_level: "TEAM_LEADER".to_owned(),
            dept_scope: None,
            team_scope: None,
        }),
    )
    .await;

    assert!(matches!(result, Err(ApiError(AppError::Forbidden(_)))));
}

#[tokio::test]
async fn admin_override_replaces_inferred_role() {
    let (state, _repository) = seeded_state().await;

    let result = set_role_override_handler(
        State(state.clone()),
        Extension(caller(ADMIN)),
        Path(SALES_STAFF.to_owned()),
        Json(SetRoleOverrideRequest {
            role_level: "TEAM_LEADER".to_owned(),
            dept_scope: None,
            team_scope: Some("Nhóm 2".to_owned()),
        }),
    )
    .await;

    let Ok(Json(entry)) = result else {
        panic!("admin can assign roles");
    };
    assert_eq!(entry.inferred_role, "STAFF");
    assert_eq!(entry.effective.role_level, "TEAM_LEADER");
    assert_eq!(entry.effective.source, "override");
    assert_eq!(entry.effective.dept_scope.as_deref(), Some("Kinh doanh"));
    assert_eq!(entry.effective.team_scope.as_deref(), Some("Nhóm 2"));

    let cleared = clear_role_override_handler(
        State(state),
        Extension(caller(ADMIN)),
        Path(SALES_STAFF.to_owned()),
    )
    .await;
    assert!(matches!(cleared, Ok(Json(entry)) if entry.role_override.is_none()));
}

#[tokio::test]
async fn admin_cannot_clear_own_super_admin() {
    let (state, _repository) = seeded_state().await;

    let result =
        clear_role_override_handler(State(state), Extension(caller(ADMIN)), Path(ADMIN.to_owned()))
            .await;

    assert!(matches!(result, Err(ApiError(AppError::Conflict(_)))));
}

#[tokio::test]
async fn toggle_flips_one_cell_of_the_grid() {
    let (state, _repository) = seeded_state().await;

    let toggled = toggle_permission_handler(
        State(state.clone()),
        Extension(caller(ADMIN)),
        Json(TogglePermissionRequest {
            role_level: "STAFF".to_owned(),
            module: "calendar".to_owned(),
            action: "view".to_owned(),
        }),
    )
    .await;
    assert!(matches!(toggled, Ok(Json(rule)) if rule.can_view && !rule.can_edit));

    let Ok(Json(grid)) = permission_matrix_handler(State(state), Extension(caller(ADMIN))).await
    else {
        panic!("admin can read the matrix");
    };
    assert_eq!(grid.len(), 4 * 6);
    assert!(grid.iter().all(|cell| cell.role_level != "SUPER_ADMIN"));
    assert!(
        grid.iter()
            .any(|cell| cell.role_level == "STAFF" && cell.module == "calendar" && cell.can_view)
    );
}

#[tokio::test]
async fn toggling_super_admin_is_rejected() {
    let (state, _repository) = seeded_state().await;

    let result = toggle_permission_handler(
        State(state),
        Extension(caller(ADMIN)),
        Json(TogglePermissionRequest {
            role_level: "SUPER_ADMIN".to_owned(),
            module: "tasks".to_owned(),
            action: "delete".to_owned(),
        }),
    )
    .await;

    assert!(matches!(result, Err(ApiError(AppError::Validation(_)))));
}
