use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use hrdesk_core::UserIdentity;
use hrdesk_domain::TaskId;
use tracing::warn;
use uuid::Uuid;

use crate::dto::{
    CreateTaskRequest, ReplaceAssignmentsRequest, TaskCardResponse, TaskListQuery, TaskResponse,
    UpdateTaskRequest, assignment_inputs,
};
use crate::error::ApiResult;
use crate::handlers::is_backend_failure;
use crate::state::AppState;

mod attachments;
mod board;


pub use attachments::{list_attachments_handler, upload_attachment_handler};
pub use board::{board_handler, move_task_handler, task_progress_handler};

pub async fn list_tasks_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<TaskListQuery>,
) -> ApiResult<Json<Vec<TaskCardResponse>>> {
    let filter = query.into_filter(user.employee_code())?;
    let cards = state
        .task_service
        .list_tasks(&user, &filter)
        .await?
        .into_iter()
        .map(TaskCardResponse::from)
        .collect();

    Ok(Json(cards))
}

pub async fn create_task_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskCardResponse>)> {
    let input = payload.into_input()?;
    let card = state
        .task_service
        .create_task(&user, input)
        .await
        .inspect_err(|error| {
            if is_backend_failure(error) {
                warn!(
                    error = %error,
                    employee_code = %user.employee_code(),
                    "task creation failed at the backend"
                );
            }
        })?;

    Ok((StatusCode::CREATED, Json(TaskCardResponse::from(card))))
}

pub async fn get_task_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<TaskCardResponse>> {
    let card = state
        .task_service
        .get_task(&user, TaskId::from_uuid(task_id))
        .await?;

    Ok(Json(TaskCardResponse::from(card)))
}

pub async fn update_task_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(task_id): Path<Uuid>,
    Json(payload): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state
        .task_service
        .update_task(&user, TaskId::from_uuid(task_id), payload.into_patch()?)
        .await?;

    Ok(Json(TaskResponse::from(task)))
}

pub async fn delete_task_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .task_service
        .delete_task(&user, TaskId::from_uuid(task_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn replace_assignments_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(task_id): Path<Uuid>,
    Json(payload): Json<ReplaceAssignmentsRequest>,
) -> ApiResult<Json<TaskCardResponse>> {
    let card = state
        .task_service
        .replace_assignments(
            &user,
            TaskId::from_uuid(task_id),
            assignment_inputs(payload.assignments)?,
        )
        .await?;

    Ok(Json(TaskCardResponse::from(card)))
}
