use std::sync::Arc;

use hrdesk_core::{AppError, AppResult};
use hrdesk_domain::{Assignee, AssignmentKind, TaskAssignment, TaskCard, TaskDraft, TaskId};

use crate::{AttachmentRepository, AuthorizationService, ObjectStorage, TaskRepository};

mod attachments;
mod commands;
mod queries;


/// One assignee entered in the task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentInput {
    /// Assigned party.
    pub assignee: Assignee,
    /// Primary or collaborator.
    pub kind: AssignmentKind,
}

/// Input payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskInput {
    /// Task fields.
    pub draft: TaskDraft,
    /// Assignees saved after the task row.
    pub assignments: Vec<AssignmentInput>,
}

/// File uploaded from the task modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUpload {
    /// Original file name.
    pub file_name: String,
    /// MIME type reported by the client.
    pub content_type: Option<String>,
    /// File content.
    pub bytes: Vec<u8>,
}

/// Task use cases: list, board, form, assignments, and attachments.
#[derive(Clone)]
pub struct TaskService {
    authorization_service: AuthorizationService,
    tasks: Arc<dyn TaskRepository>,
    attachments: Arc<dyn AttachmentRepository>,
    storage: Arc<dyn ObjectStorage>,
}

impl TaskService {
    /// Creates a task service from repository implementations.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        tasks: Arc<dyn TaskRepository>,
        attachments: Arc<dyn AttachmentRepository>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            authorization_service,
            tasks,
            attachments,
            storage,
        }
    }

    async fn load_card(&self, task_id: TaskId) -> AppResult<TaskCard> {
        let task = self
            .tasks
            .find_task(task_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("task '{task_id}' does not exist")))?;
        let assignments = self.tasks.list_assignments(&[task_id]).await?;

        Ok(TaskCard { task, assignments })
    }
}

fn to_assignments(task_id: TaskId, inputs: Vec<AssignmentInput>) -> Vec<TaskAssignment> {
    inputs
        .into_iter()
        .map(|input| TaskAssignment {
            task_id,
            assignee: input.assignee,
            kind: input.kind,
        })
        .collect()
}
