use axum::Json;
use axum::body::Bytes;
use axum::extract::{Extension, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use hrdesk_application::AttachmentUpload;
use hrdesk_core::UserIdentity;
use hrdesk_domain::TaskId;
use tracing::warn;
use uuid::Uuid;

use crate::dto::{AttachmentUploadQuery, TaskAttachmentResponse};
use crate::error::ApiResult;
use crate::handlers::is_backend_failure;
use crate::state::AppState;

pub async fn list_attachments_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Vec<TaskAttachmentResponse>>> {
    let attachments = state
        .task_service
        .list_attachments(&user, TaskId::from_uuid(task_id))
        .await?
        .into_iter()
        .map(TaskAttachmentResponse::from)
        .collect();

    Ok(Json(attachments))
}

/// Accepts the raw file as the request body; the name travels in the query.
pub async fn upload_attachment_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(task_id): Path<Uuid>,
    Query(query): Query<AttachmentUploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<TaskAttachmentResponse>)> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let attachment = state
        .task_service
        .upload_attachment(
            &user,
            TaskId::from_uuid(task_id),
            AttachmentUpload {
                file_name: query.file_name,
                content_type,
                bytes: body.to_vec(),
            },
        )
        .await
        .inspect_err(|error| {
            if is_backend_failure(error) {
                warn!(
                    error = %error,
                    task_id = %task_id,
                    employee_code = %user.employee_code(),
                    "attachment upload failed at the backend"
                );
            }
        })?;

    Ok((
        StatusCode::CREATED,
        Json(TaskAttachmentResponse::from(attachment)),
    ))
}
