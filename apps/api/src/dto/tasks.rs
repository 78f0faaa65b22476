use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

mod conversions;

pub use conversions::assignment_inputs;

/// API representation of a task.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/task-response.ts"
)]
pub struct TaskResponse {
    pub task_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub status_label: String,
    pub status_tone: String,
    pub priority: String,
    pub priority_label: String,
    pub priority_tone: String,
    pub progress: u8,
    /// `YYYY-MM-DD`.
    pub due_date: Option<String>,
    pub department: Option<String>,
    pub team: Option<String>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

/// One assignee of a task, as sent and returned by the task form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/task-assignment-dto.ts"
)]
pub struct TaskAssignmentDto {
    /// `person` or `department`.
    pub assignee_type: String,
    /// Employee code or department name.
    pub assignee_value: String,
    /// `primary` or `collaborator`.
    pub kind: String,
}

/// Task with its assignees.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/task-card-response.ts"
)]
pub struct TaskCardResponse {
    pub task: TaskResponse,
    pub assignments: Vec<TaskAssignmentDto>,
}

/// One board column.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/board-column-response.ts"
)]
pub struct BoardColumnResponse {
    pub status: String,
    pub label: String,
    pub tone: String,
    pub tasks: Vec<TaskResponse>,
}

/// Attachment metadata.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/task-attachment-response.ts"
)]
pub struct TaskAttachmentResponse {
    pub attachment_id: String,
    pub task_id: String,
    pub file_name: String,
    pub object_path: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub uploaded_by: String,
    pub uploaded_at: String,
}

/// Incoming payload for task creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-task-request.ts"
)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub progress: Option<i32>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub assignments: Vec<TaskAssignmentDto>,
}

/// Partial task update. Absent fields are left unchanged; `null` clears
/// the optional description and due date.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-task-request.ts"
)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub progress: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<String>>,
}

/// Replaces all assignees of a task.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/replace-assignments-request.ts"
)]
pub struct ReplaceAssignmentsRequest {
    pub assignments: Vec<TaskAssignmentDto>,
}

/// Board drag-and-drop target.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/move-task-request.ts"
)]
pub struct MoveTaskRequest {
    pub status: String,
}

/// Progress slider value.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/task-progress-request.ts"
)]
pub struct TaskProgressRequest {
    pub progress: i32,
}

/// Task list filters. `assignee=me` stands for the caller.
#[derive(Debug, Default, Deserialize)]
pub struct TaskListQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub search: Option<String>,
}

/// File name of a raw-body attachment upload.
#[derive(Debug, Deserialize)]
pub struct AttachmentUploadQuery {
    pub file_name: String,
}

/// Distinguishes an explicit `null` from an absent field.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
