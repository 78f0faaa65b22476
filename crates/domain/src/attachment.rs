use chrono::{DateTime, Utc};
use hrdesk_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TaskId;

/// Largest accepted attachment, in bytes.
pub const MAX_ATTACHMENT_BYTES: usize = 20 * 1024 * 1024;

/// File attached to a task; the bytes live in the object-storage bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAttachment {
    attachment_id: Uuid,
    task_id: TaskId,
    file_name: NonEmptyString,
    object_path: NonEmptyString,
    content_type: Option<String>,
    size_bytes: i64,
    uploaded_by: NonEmptyString,
    uploaded_at: DateTime<Utc>,
}

impl TaskAttachment {
    /// Creates a validated attachment record.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        attachment_id: Uuid,
        task_id: TaskId,
        file_name: impl Into<String>,
        object_path: impl Into<String>,
        content_type: Option<String>,
        size_bytes: i64,
        uploaded_by: impl Into<String>,
        uploaded_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        if size_bytes < 0 {
            return Err(AppError::Validation(
                "attachment size must not be negative".to_owned(),
            ));
        }

        Ok(Self {
            attachment_id,
            task_id,
            file_name: NonEmptyString::new(file_name)?,
            object_path: NonEmptyString::new(object_path)?,
            content_type,
            size_bytes,
            uploaded_by: NonEmptyString::new(uploaded_by)?,
            uploaded_at,
        })
    }

    /// Returns the attachment identifier.
    #[must_use]
    pub fn attachment_id(&self) -> Uuid {
        self.attachment_id
    }

    /// Returns the owning task.
    #[must_use]
    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the original file name.
    #[must_use]
    pub fn file_name(&self) -> &NonEmptyString {
        &self.file_name
    }

    /// Returns the object path inside the bucket.
    #[must_use]
    pub fn object_path(&self) -> &NonEmptyString {
        &self.object_path
    }

    /// Returns the MIME type, when known.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the size in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> i64 {
        self.size_bytes
    }

    /// Returns the uploader employee code.
    #[must_use]
    pub fn uploaded_by(&self) -> &NonEmptyString {
        &self.uploaded_by
    }

    /// Returns the upload timestamp.
    #[must_use]
    pub fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }
}

/// Builds the bucket path `tasks/{task_id}/{attachment_id}-{file_name}`, with
/// path separators and control characters in the file name replaced.
pub fn attachment_object_path(
    task_id: TaskId,
    attachment_id: Uuid,
    file_name: &str,
) -> AppResult<String> {
    let sanitized: String = file_name
        .trim()
        .chars()
        .map(|character| {
            if character == '/' || character == '\\' || character.is_control() {
                '_'
            } else {
                character
            }
        })
        .collect();

    if sanitized.is_empty() || sanitized.chars().all(|character| character == '.') {
        return Err(AppError::Validation(format!(
            "invalid attachment file name '{file_name}'"
        )));
    }

    Ok(format!("tasks/{task_id}/{attachment_id}-{sanitized}"))
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::attachment_object_path;
    use crate::TaskId;

    #[test]
    fn object_path_strips_separators() {
        let task_id = TaskId::from_uuid(Uuid::nil());
        let attachment_id = Uuid::nil();
        let path = attachment_object_path(task_id, attachment_id, "../hợp đồng/v1.pdf");
        assert_eq!(
            path.unwrap_or_default(),
            format!("tasks/{task_id}/{attachment_id}-.._hợp đồng_v1.pdf")
        );
    }

    #[test]
    fn dot_only_names_are_rejected() {
        let task_id = TaskId::new();
        assert!(attachment_object_path(task_id, Uuid::new_v4(), "..").is_err());
        assert!(attachment_object_path(task_id, Uuid::new_v4(), "  ").is_err());
    }
}
