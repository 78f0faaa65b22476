use async_trait::async_trait;
use hrdesk_core::AppResult;
use hrdesk_domain::{Task, TaskAssignment, TaskAttachment, TaskId, TaskPatch};

/// Repository port for tasks and their assignees.
///
/// Task rows and assignment rows are written by separate calls; nothing here
/// spans both in one transaction.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Lists every task.
    async fn list_tasks(&self) -> AppResult<Vec<Task>>;

    /// Finds one task.
    async fn find_task(&self, task_id: TaskId) -> AppResult<Option<Task>>;

    /// Inserts a new task row.
    async fn insert_task(&self, task: Task) -> AppResult<()>;

    /// Updates the columns set in the patch and returns the stored row.
    async fn update_task(&self, task_id: TaskId, patch: TaskPatch) -> AppResult<Task>;

    /// Deletes a task row; assignments and attachments cascade in storage.
    async fn delete_task(&self, task_id: TaskId) -> AppResult<()>;

    /// Lists assignments of the given tasks.
    async fn list_assignments(&self, task_ids: &[TaskId]) -> AppResult<Vec<TaskAssignment>>;

    /// Inserts assignment rows.
    async fn insert_assignments(&self, assignments: Vec<TaskAssignment>) -> AppResult<()>;

    /// Deletes every assignment of a task.
    async fn delete_assignments(&self, task_id: TaskId) -> AppResult<()>;
}

/// Repository port for attachment metadata rows.
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Lists attachments of a task, oldest first.
    async fn list_attachments(&self, task_id: TaskId) -> AppResult<Vec<TaskAttachment>>;

    /// Inserts an attachment row.
    async fn insert_attachment(&self, attachment: TaskAttachment) -> AppResult<()>;
}

/// Blob storage port backed by the object-storage bucket.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Creates the bucket when it does not exist yet.
    async fn ensure_bucket(&self) -> AppResult<()>;

    /// Uploads an object, replacing any previous content at the path.
    async fn upload_object(
        &self,
        object_path: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> AppResult<()>;

    /// Removes an object.
    async fn remove_object(&self, object_path: &str) -> AppResult<()>;
}
