use chrono::Utc;
use hrdesk_core::{AppError, AppResult, UserIdentity, trimmed_non_empty};
use hrdesk_domain::{
    MAX_ATTACHMENT_BYTES, PermissionAction, TaskAttachment, TaskId, attachment_object_path,
};
use uuid::Uuid;

use super::{AttachmentUpload, TaskService};

impl TaskService {
    /// Lists attachments of a task the caller can view.
    pub async fn list_attachments(
        &self,
        identity: &UserIdentity,
        task_id: TaskId,
    ) -> AppResult<Vec<TaskAttachment>> {
        self.authorize_card(identity, task_id, PermissionAction::View)
            .await?;
        self.attachments.list_attachments(task_id).await
    }

    /// Uploads a file to the bucket and then records it against the task.
    pub async fn upload_attachment(
        &self,
        identity: &UserIdentity,
        task_id: TaskId,
        upload: AttachmentUpload,
    ) -> AppResult<TaskAttachment> {
        if upload.bytes.is_empty() {
            return Err(AppError::Validation("attachment file is empty".to_owned()));
        }
        if upload.bytes.len() > MAX_ATTACHMENT_BYTES {
            return Err(AppError::Validation(format!(
                "attachment exceeds {MAX_ATTACHMENT_BYTES} bytes"
            )));
        }

        self.authorize_card(identity, task_id, PermissionAction::Edit)
            .await?;

        let attachment_id = Uuid::new_v4();
        let object_path = attachment_object_path(task_id, attachment_id, &upload.file_name)?;
        let content_type = trimmed_non_empty(upload.content_type);
        let size_bytes = i64::try_from(upload.bytes.len()).map_err(|error| {
            AppError::Validation(format!("invalid attachment size: {error}"))
        })?;

        let attachment = TaskAttachment::new(
            attachment_id,
            task_id,
            upload.file_name,
            object_path.clone(),
            content_type.clone(),
            size_bytes,
            identity.employee_code(),
            Utc::now(),
        )?;

        self.storage
            .upload_object(&object_path, upload.bytes, content_type.as_deref())
            .await?;

        if let Err(error) = self.attachments.insert_attachment(attachment.clone()).await {
            return Err(match self.storage.remove_object(&object_path).await {
                Ok(()) => error,
                Err(cleanup_error) => error.with_context(&format!(
                    "uploaded object '{object_path}' is orphaned ({cleanup_error})"
                )),
            });
        }

        Ok(attachment)
    }
}
