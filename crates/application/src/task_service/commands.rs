use chrono::Utc;
use hrdesk_core::{AppResult, UserIdentity};
use hrdesk_domain::{
    PermissionAction, Task, TaskBoard, TaskCard, TaskId, TaskPatch, TaskProgress, TaskStatus,
    validate_assignments,
};

use super::{AssignmentInput, CreateTaskInput, TaskService, to_assignments};

impl TaskService {
    /// Creates a task and then its assignments in a second, independent call.
    ///
    /// When the assignment insert fails the task row stays stored without
    /// assignees and the error is returned with the task id in its message.
    pub async fn create_task(
        &self,
        identity: &UserIdentity,
        input: CreateTaskInput,
    ) -> AppResult<TaskCard> {
        let actor = self.authorization_service.resolve_actor(identity).await?;

        let task_id = TaskId::new();
        let task = Task::create(task_id, input.draft, actor.employee_code(), Utc::now())?;
        let assignments = to_assignments(task_id, input.assignments);
        validate_assignments(&assignments)?;

        let card = TaskCard { task, assignments };
        self.authorization_service
            .require_action(&actor, PermissionAction::Edit, &card.target())
            .await?;

        self.tasks.insert_task(card.task.clone()).await?;
        if !card.assignments.is_empty() {
            self.tasks
                .insert_assignments(card.assignments.clone())
                .await
                .map_err(|error| {
                    error.with_context(&format!(
                        "task '{task_id}' was saved without assignments"
                    ))
                })?;
        }

        Ok(card)
    }

    /// Applies a partial update to task fields.
    pub async fn update_task(
        &self,
        identity: &UserIdentity,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> AppResult<Task> {
        let card = self.authorize_card(identity, task_id, PermissionAction::Edit).await?;
        if patch.is_empty() {
            return Ok(card.task);
        }

        // Reject invalid values before they reach the backend.
        card.task.clone().apply(&patch, Utc::now())?;
        self.tasks.update_task(task_id, patch).await
    }

    /// Replaces every assignment of a task: delete, then insert.
    pub async fn replace_assignments(
        &self,
        identity: &UserIdentity,
        task_id: TaskId,
        inputs: Vec<AssignmentInput>,
    ) -> AppResult<TaskCard> {
        let card = self.authorize_card(identity, task_id, PermissionAction::Edit).await?;
        let assignments = to_assignments(task_id, inputs);
        validate_assignments(&assignments)?;

        self.tasks.delete_assignments(task_id).await?;
        if !assignments.is_empty() {
            self.tasks.insert_assignments(assignments.clone()).await?;
        }

        Ok(TaskCard {
            task: card.task,
            assignments,
        })
    }

    /// Deletes a task.
    pub async fn delete_task(&self, identity: &UserIdentity, task_id: TaskId) -> AppResult<()> {
        self.authorize_card(identity, task_id, PermissionAction::Delete)
            .await?;
        self.tasks.delete_task(task_id).await
    }

    /// Moves a card to another board column with one status-only update.
    /// Dropping a card on its own column writes nothing.
    pub async fn move_task_status(
        &self,
        identity: &UserIdentity,
        task_id: TaskId,
        status: TaskStatus,
    ) -> AppResult<Task> {
        let card = self.authorize_card(identity, task_id, PermissionAction::Edit).await?;
        let board = TaskBoard::from_tasks([card.task.clone()]);

        match board.move_patch(task_id, status)? {
            Some(patch) => self.tasks.update_task(task_id, patch).await,
            None => Ok(card.task),
        }
    }

    /// Writes a new progress value through to the backend.
    pub async fn set_progress(
        &self,
        identity: &UserIdentity,
        task_id: TaskId,
        progress: i32,
    ) -> AppResult<Task> {
        let progress = TaskProgress::new(progress)?;
        self.authorize_card(identity, task_id, PermissionAction::Edit)
            .await?;
        self.tasks
            .update_task(task_id, TaskPatch::progress_only(progress))
            .await
    }

    pub(super) async fn authorize_card(
        &self,
        identity: &UserIdentity,
        task_id: TaskId,
        action: PermissionAction,
    ) -> AppResult<TaskCard> {
        let actor = self.authorization_service.resolve_actor(identity).await?;
        let card = self.load_card(task_id).await?;
        self.authorization_service
            .require_action(&actor, action, &card.target())
            .await?;
        Ok(card)
    }
}
