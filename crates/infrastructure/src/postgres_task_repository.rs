use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use hrdesk_application::{AttachmentRepository, TaskRepository};
use hrdesk_core::{AppError, AppResult, trimmed_non_empty};
use hrdesk_domain::{
    Assignee, AssignmentKind, Task, TaskAssignment, TaskAttachment, TaskId, TaskPatch,
    TaskPriority, TaskStatus,
};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::backend_error::sqlx_error;


/// PostgreSQL-backed task, assignment, and attachment repository.
#[derive(Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TaskRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    status: String,
    priority: String,
    progress: i32,
    due_date: Option<NaiveDate>,
    department: Option<String>,
    team: Option<String>,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = AppError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Task::restore(
            TaskId::from_uuid(row.id),
            row.title,
            row.description,
            TaskStatus::from_str(row.status.as_str())?,
            TaskPriority::from_str(row.priority.as_str())?,
            row.progress,
            row.due_date,
            row.department,
            row.team,
            row.created_by,
            row.created_at,
            row.updated_at,
        )
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRow {
    task_id: Uuid,
    assignee_type: String,
    assignee_value: String,
    kind: String,
}

impl TryFrom<AssignmentRow> for TaskAssignment {
    type Error = AppError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            task_id: TaskId::from_uuid(row.task_id),
            assignee: Assignee::from_parts(row.assignee_type.as_str(), row.assignee_value.as_str())?,
            kind: AssignmentKind::from_str(row.kind.as_str())?,
        })
    }
}

#[derive(Debug, FromRow)]
struct AttachmentRow {
    id: Uuid,
    task_id: Uuid,
    file_name: String,
    object_path: String,
    content_type: Option<String>,
    size_bytes: i64,
    uploaded_by: String,
    uploaded_at: DateTime<Utc>,
}

impl TryFrom<AttachmentRow> for TaskAttachment {
    type Error = AppError;

    fn try_from(row: AttachmentRow) -> Result<Self, Self::Error> {
        TaskAttachment::new(
            row.id,
            TaskId::from_uuid(row.task_id),
            row.file_name,
            row.object_path,
            row.content_type,
            row.size_bytes,
            row.uploaded_by,
            row.uploaded_at,
        )
    }
}

const TASK_COLUMNS: &str = "id, title, description, status, priority, progress, due_date, \
     department, team, created_by, created_at, updated_at";

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| sqlx_error("list tasks", error))?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn find_task(&self, task_id: TaskId) -> AppResult<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(task_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| sqlx_error("find task", error))?;

        row.map(Task::try_from).transpose()
    }

    async fn insert_task(&self, task: Task) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks (
                id, title, description, status, priority, progress, due_date,
                department, team, created_by, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(task.task_id().as_uuid())
        .bind(task.title().as_str())
        .bind(task.description())
        .bind(task.status().as_str())
        .bind(task.priority().as_str())
        .bind(i32::from(task.progress().value()))
        .bind(task.due_date())
        .bind(task.department())
        .bind(task.team())
        .bind(task.created_by().as_str())
        .bind(task.created_at())
        .bind(task.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| sqlx_error("insert task", error))?;

        Ok(())
    }

    async fn update_task(&self, task_id: TaskId, patch: TaskPatch) -> AppResult<Task> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("UPDATE tasks SET updated_at = now()");

        if let Some(title) = patch.title {
            builder.push(", title = ").push_bind(title.trim().to_owned());
        }
        if let Some(description) = patch.description {
            builder
                .push(", description = ")
                .push_bind(trimmed_non_empty(description));
        }
        if let Some(status) = patch.status {
            builder.push(", status = ").push_bind(status.as_str());
        }
        if let Some(priority) = patch.priority {
            builder.push(", priority = ").push_bind(priority.as_str());
        }
        if let Some(progress) = patch.progress {
            builder
                .push(", progress = ")
                .push_bind(i32::from(progress.value()));
        }
        if let Some(due_date) = patch.due_date {
            builder.push(", due_date = ").push_bind(due_date);
        }

        builder
            .push(" WHERE id = ")
            .push_bind(task_id.as_uuid())
            .push(format!(" RETURNING {TASK_COLUMNS}"));

        let row = builder
            .build_query_as::<TaskRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| sqlx_error("update task", error))?
            .ok_or_else(|| AppError::NotFound(format!("task '{task_id}' does not exist")))?;

        Task::try_from(row)
    }

    async fn delete_task(&self, task_id: TaskId) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(task_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| sqlx_error("delete task", error))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "task '{task_id}' does not exist"
            )));
        }

        Ok(())
    }

    async fn list_assignments(&self, task_ids: &[TaskId]) -> AppResult<Vec<TaskAssignment>> {
        if task_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = task_ids.iter().map(TaskId::as_uuid).collect();
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT task_id, assignee_type, assignee_value, kind
            FROM task_assignments
            WHERE task_id = ANY($1)
            ORDER BY task_id, kind DESC, assignee_value
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| sqlx_error("list task assignments", error))?;

        rows.into_iter().map(TaskAssignment::try_from).collect()
    }

    async fn insert_assignments(&self, assignments: Vec<TaskAssignment>) -> AppResult<()> {
        if assignments.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "INSERT INTO task_assignments (task_id, assignee_type, assignee_value, kind) ",
        );
        builder.push_values(assignments, |mut row, assignment| {
            row.push_bind(assignment.task_id.as_uuid())
                .push_bind(assignment.assignee.kind())
                .push_bind(assignment.assignee.value().to_owned())
                .push_bind(assignment.kind.as_str());
        });

        builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|error| sqlx_error("insert task assignments", error))?;

        Ok(())
    }

    async fn delete_assignments(&self, task_id: TaskId) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM task_assignments
            WHERE task_id = $1
            "#,
        )
        .bind(task_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| sqlx_error("delete task assignments", error))?;

        Ok(())
    }
}

#[async_trait]
impl AttachmentRepository for PostgresTaskRepository {
    async fn list_attachments(&self, task_id: TaskId) -> AppResult<Vec<TaskAttachment>> {
        let rows = sqlx::query_as::<_, AttachmentRow>(
            r#"
            SELECT id, task_id, file_name, object_path, content_type, size_bytes,
                   uploaded_by, uploaded_at
            FROM task_attachments
            WHERE task_id = $1
            ORDER BY uploaded_at
            "#,
        )
        .bind(task_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| sqlx_error("list task attachments", error))?;

        rows.into_iter().map(TaskAttachment::try_from).collect()
    }

    async fn insert_attachment(&self, attachment: TaskAttachment) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO task_attachments (
                id, task_id, file_name, object_path, content_type, size_bytes,
                uploaded_by, uploaded_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(attachment.attachment_id())
        .bind(attachment.task_id().as_uuid())
        .bind(attachment.file_name().as_str())
        .bind(attachment.object_path().as_str())
        .bind(attachment.content_type())
        .bind(attachment.size_bytes())
        .bind(attachment.uploaded_by().as_str())
        .bind(attachment.uploaded_at())
        .execute(&self.pool)
        .await
        .map_err(|error| sqlx_error("insert task attachment", error))?;

        Ok(())
    }
}
