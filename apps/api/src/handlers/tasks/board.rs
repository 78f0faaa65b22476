use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, State};
use hrdesk_core::UserIdentity;
use hrdesk_domain::{TaskId, TaskStatus};
use uuid::Uuid;

use crate::dto::{BoardColumnResponse, MoveTaskRequest, TaskProgressRequest, TaskResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn board_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<BoardColumnResponse>>> {
    let columns = state
        .task_service
        .board(&user)
        .await?
        .into_columns()
        .into_iter()
        .map(BoardColumnResponse::from)
        .collect();

    Ok(Json(columns))
}

pub async fn move_task_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(task_id): Path<Uuid>,
    Json(payload): Json<MoveTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let status = TaskStatus::from_str(payload.status.as_str())?;
    let task = state
        .task_service
        .move_task_status(&user, TaskId::from_uuid(task_id), status)
        .await?;

    Ok(Json(TaskResponse::from(task)))
}

pub async fn task_progress_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(task_id): Path<Uuid>,
    Json(payload): Json<TaskProgressRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state
        .task_service
        .set_progress(&user, TaskId::from_uuid(task_id), payload.progress)
        .await?;

    Ok(Json(TaskResponse::from(task)))
}
