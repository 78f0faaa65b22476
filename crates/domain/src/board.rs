use hrdesk_core::{AppError, AppResult};

use crate::{Task, TaskId, TaskPatch, TaskStatus};

/// One status column of the task board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn {
    /// Column status.
    pub status: TaskStatus,
    /// Tasks currently in the column.
    pub tasks: Vec<Task>,
}

/// Tasks grouped into the six fixed status columns.
///
/// A board is rebuilt from persisted tasks on every read, so it mirrors the
/// last successfully written state and a failed move leaves it unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBoard {
    columns: Vec<BoardColumn>,
}

impl TaskBoard {
    /// Groups tasks by status, keeping the incoming order inside each column.
    #[must_use]
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut columns: Vec<BoardColumn> = TaskStatus::all()
            .iter()
            .map(|status| BoardColumn {
                status: *status,
                tasks: Vec::new(),
            })
            .collect();

        for task in tasks {
            if let Some(column) = columns.iter_mut().find(|column| column.status == task.status()) {
                column.tasks.push(task);
            }
        }

        Self { columns }
    }

    /// Returns the columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    /// Consumes the board and returns its columns.
    #[must_use]
    pub fn into_columns(self) -> Vec<BoardColumn> {
        self.columns
    }

    /// Finds a task on the board.
    #[must_use]
    pub fn find(&self, task_id: TaskId) -> Option<&Task> {
        self.columns
            .iter()
            .flat_map(|column| column.tasks.iter())
            .find(|task| task.task_id() == task_id)
    }

    /// Returns the patch for dropping a card on another column, or `None` when
    /// the card is dropped on its own column.
    pub fn move_patch(&self, task_id: TaskId, target: TaskStatus) -> AppResult<Option<TaskPatch>> {
        let task = self.find(task_id).ok_or_else(|| {
            AppError::NotFound(format!("task '{task_id}' is not on the board"))
        })?;

        Ok((task.status() != target).then(|| TaskPatch::status_only(target)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::TaskBoard;
    use crate::{Task, TaskDraft, TaskId, TaskPriority, TaskStatus};

    fn task(status: TaskStatus) -> Option<Task> {
        Task::create(
            TaskId::new(),
            TaskDraft {
                title: "Chuẩn bị báo cáo quý".to_owned(),
                description: None,
                status,
                priority: TaskPriority::Medium,
                progress: 0,
                due_date: None,
                department: None,
                team: None,
            },
            "NV001",
            Utc::now(),
        )
        .ok()
    }

    #[test]
    fn board_has_fixed_columns() {
        let board = TaskBoard::from_tasks(task(TaskStatus::Done));
        assert_eq!(board.columns().len(), 6);
        assert_eq!(board.columns()[0].status, TaskStatus::New);
        assert_eq!(board.columns()[3].tasks.len(), 1);
    }

    #[test]
    fn moving_to_another_column_yields_status_only_patch() {
        let Some(task) = task(TaskStatus::New) else {
            panic!("fixture task must be valid");
        };
        let task_id = task.task_id();
        let board = TaskBoard::from_tasks([task]);

        let patch = board.move_patch(task_id, TaskStatus::InProgress);
        let Ok(Some(patch)) = patch else {
            panic!("expected a patch for a cross-column move");
        };
        assert_eq!(patch.status, Some(TaskStatus::InProgress));
        assert!(patch.progress.is_none() && patch.title.is_none());
    }

    #[test]
    fn moving_an_unknown_card_is_not_found() {
        let board = TaskBoard::from_tasks(task(TaskStatus::New));
        assert!(board.move_patch(TaskId::new(), TaskStatus::Done).is_err());
    }

    #[test]
    fn dropping_on_same_column_is_a_no_op() {
        let Some(task) = task(TaskStatus::Review) else {
            panic!("fixture task must be valid");
        };
        let task_id = task.task_id();
        let board = TaskBoard::from_tasks([task]);
        assert!(matches!(board.move_patch(task_id, TaskStatus::Review), Ok(None)));
    }
}
