use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use hrdesk_core::AppError;
use hrdesk_domain::MAX_ATTACHMENT_BYTES;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(app_state: AppState) -> Result<Router, AppError> {
    let cors_layer = cors::build_cors_layer(
        app_state.frontend_url.as_str(),
        app_state.identity_header.as_str(),
    )?;

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes(app_state.clone()))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}

fn protected_routes(app_state: AppState) -> Router<AppState> {
    use handlers::{grading, profile, settings, tasks};

    Router::new()
        .route("/api/me", get(profile::me_handler))
        .route("/api/navigation", get(profile::navigation_handler))
        .route("/api/vocabulary", get(profile::vocabulary_handler))
        .route(
            "/api/tasks",
            get(tasks::list_tasks_handler).post(tasks::create_task_handler),
        )
        .route(
            "/api/tasks/{task_id}",
            get(tasks::get_task_handler)
                .patch(tasks::update_task_handler)
                .delete(tasks::delete_task_handler),
        )
        .route(
            "/api/tasks/{task_id}/assignments",
            put(tasks::replace_assignments_handler),
        )
        .route("/api/tasks/{task_id}/status", put(tasks::move_task_handler))
        .route(
            "/api/tasks/{task_id}/progress",
            put(tasks::task_progress_handler),
        )
        .route(
            "/api/tasks/{task_id}/attachments",
            get(tasks::list_attachments_handler).post(tasks::upload_attachment_handler).layer(
                DefaultBodyLimit::max(MAX_ATTACHMENT_BYTES),
            ),
        )
        .route("/api/board", get(tasks::board_handler))
        .route(
            "/api/settings/role-assignments",
            get(settings::list_role_assignments_handler),
        )
        .route(
            "/api/settings/role-assignments/{employee_code}",
            put(settings::set_role_override_handler).delete(settings::clear_role_override_handler),
        )
        .route(
            "/api/settings/permissions",
            get(settings::permission_matrix_handler),
        )
        .route(
            "/api/settings/permissions/toggle",
            post(settings::toggle_permission_handler),
        )
        .route(
            "/api/grading/targets",
            get(grading::grading_targets_handler),
        )
        .route(
            "/api/grading/grades",
            get(grading::list_grades_handler).post(grading::save_grade_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .route_layer(from_fn_with_state(app_state, middleware::require_identity))
}
