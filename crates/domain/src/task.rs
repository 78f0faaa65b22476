use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use hrdesk_core::{AppError, AppResult, NonEmptyString, trimmed_non_empty};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Visual tone used for status and priority badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    /// Grey.
    Neutral,
    /// Blue.
    Info,
    /// Brand colour.
    Primary,
    /// Amber.
    Warning,
    /// Green.
    Success,
    /// Red.
    Danger,
}

impl BadgeTone {
    /// Returns a stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Info => "info",
            Self::Primary => "primary",
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }
}

/// Task workflow status. Declaration order is the board column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Mới giao.
    New,
    /// Đang làm.
    InProgress,
    /// Chờ duyệt.
    Review,
    /// Hoàn thành.
    Done,
    /// Tạm dừng.
    OnHold,
    /// Đã hủy.
    Cancelled,
}

impl TaskStatus {
    /// Returns a stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Done => "done",
            Self::OnHold => "on_hold",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns the column and badge label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "Mới giao",
            Self::InProgress => "Đang làm",
            Self::Review => "Chờ duyệt",
            Self::Done => "Hoàn thành",
            Self::OnHold => "Tạm dừng",
            Self::Cancelled => "Đã hủy",
        }
    }

    /// Returns the badge tone.
    #[must_use]
    pub fn tone(&self) -> BadgeTone {
        match self {
            Self::New => BadgeTone::Info,
            Self::InProgress => BadgeTone::Primary,
            Self::Review => BadgeTone::Warning,
            Self::Done => BadgeTone::Success,
            Self::OnHold => BadgeTone::Neutral,
            Self::Cancelled => BadgeTone::Danger,
        }
    }

    /// Returns every status in board column order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[TaskStatus] = &[
            TaskStatus::New,
            TaskStatus::InProgress,
            TaskStatus::Review,
            TaskStatus::Done,
            TaskStatus::OnHold,
            TaskStatus::Cancelled,
        ];

        ALL
    }
}

impl FromStr for TaskStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|status| status.as_str() == value || status.label() == value)
            .copied()
            .ok_or_else(|| AppError::Validation(format!("unknown task status '{value}'")))
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Thấp.
    Low,
    /// Trung bình.
    Medium,
    /// Cao.
    High,
    /// Khẩn cấp.
    Urgent,
}

impl TaskPriority {
    /// Returns a stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    /// Returns the badge label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Thấp",
            Self::Medium => "Trung bình",
            Self::High => "Cao",
            Self::Urgent => "Khẩn cấp",
        }
    }

    /// Returns the badge tone.
    #[must_use]
    pub fn tone(&self) -> BadgeTone {
        match self {
            Self::Low => BadgeTone::Neutral,
            Self::Medium => BadgeTone::Info,
            Self::High => BadgeTone::Warning,
            Self::Urgent => BadgeTone::Danger,
        }
    }

    /// Returns every priority from lowest to highest.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[TaskPriority] = &[
            TaskPriority::Low,
            TaskPriority::Medium,
            TaskPriority::High,
            TaskPriority::Urgent,
        ];

        ALL
    }
}

impl FromStr for TaskPriority {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|priority| priority.as_str() == value || priority.label() == value)
            .copied()
            .ok_or_else(|| AppError::Validation(format!("unknown task priority '{value}'")))
    }
}

/// Completion percentage bounded to 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct TaskProgress(u8);

impl TaskProgress {
    /// Creates a validated progress value.
    pub fn new(value: i32) -> AppResult<Self> {
        u8::try_from(value)
            .ok()
            .filter(|value| *value <= 100)
            .map(Self)
            .ok_or_else(|| {
                AppError::Validation(format!("progress must be between 0 and 100, got {value}"))
            })
    }

    /// Returns the percentage.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for TaskProgress {
    type Error = AppError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskProgress> for i32 {
    fn from(value: TaskProgress) -> Self {
        i32::from(value.0)
    }
}

/// Stable task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Parses a transport value.
    pub fn parse(value: &str) -> AppResult<Self> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid task id '{value}': {error}")))
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Task record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    task_id: TaskId,
    title: NonEmptyString,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    progress: TaskProgress,
    due_date: Option<NaiveDate>,
    department: Option<String>,
    team: Option<String>,
    created_by: NonEmptyString,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Field values used to create a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Initial status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Initial progress.
    pub progress: i32,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Owning department.
    pub department: Option<String>,
    /// Owning team.
    pub team: Option<String>,
}

impl Task {
    /// Creates a new task from a draft.
    pub fn create(
        task_id: TaskId,
        draft: TaskDraft,
        created_by: impl Into<String>,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        Self::restore(
            task_id,
            draft.title,
            draft.description,
            draft.status,
            draft.priority,
            draft.progress,
            draft.due_date,
            draft.department,
            draft.team,
            created_by,
            now,
            now,
        )
    }

    /// Rebuilds a task from stored values.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        task_id: TaskId,
        title: impl Into<String>,
        description: Option<String>,
        status: TaskStatus,
        priority: TaskPriority,
        progress: i32,
        due_date: Option<NaiveDate>,
        department: Option<String>,
        team: Option<String>,
        created_by: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            task_id,
            title: NonEmptyString::new(title)?,
            description: trimmed_non_empty(description),
            status,
            priority,
            progress: TaskProgress::new(progress)?,
            due_date,
            department: trimmed_non_empty(department),
            team: trimmed_non_empty(team),
            created_by: NonEmptyString::new(created_by)?,
            created_at,
            updated_at,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &NonEmptyString {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status.
    #[must_use]
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the progress.
    #[must_use]
    pub fn progress(&self) -> TaskProgress {
        self.progress
    }

    /// Returns the due date.
    #[must_use]
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the owning department.
    #[must_use]
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    /// Returns the owning team.
    #[must_use]
    pub fn team(&self) -> Option<&str> {
        self.team.as_deref()
    }

    /// Returns the creator employee code.
    #[must_use]
    pub fn created_by(&self) -> &NonEmptyString {
        &self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update; unset fields keep their value.
    pub fn apply(&mut self, patch: &TaskPatch, now: DateTime<Utc>) -> AppResult<()> {
        if let Some(title) = &patch.title {
            self.title = NonEmptyString::new(title.clone())?;
        }
        if let Some(description) = &patch.description {
            self.description = trimmed_non_empty(description.clone());
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(progress) = patch.progress {
            self.progress = progress;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        self.updated_at = now;
        Ok(())
    }
}

/// Partial task update sent to the backend. `None` leaves a column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,
    /// New description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// New status.
    pub status: Option<TaskStatus>,
    /// New priority.
    pub priority: Option<TaskPriority>,
    /// New progress.
    pub progress: Option<TaskProgress>,
    /// New due date; `Some(None)` clears it.
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    /// Builds a patch that only changes the status.
    #[must_use]
    pub fn status_only(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Builds a patch that only changes the progress.
    #[must_use]
    pub fn progress_only(progress: TaskProgress) -> Self {
        Self {
            progress: Some(progress),
            ..Self::default()
        }
    }

    /// Returns whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Party a task is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Assignee {
    /// An employee, by code.
    Person(String),
    /// A whole department, by name.
    Department(String),
}

impl Assignee {
    /// Builds an assignee from stored type and value columns.
    pub fn from_parts(kind: &str, value: &str) -> AppResult<Self> {
        let value = NonEmptyString::new(value)?;
        match kind {
            "person" => Ok(Self::Person(value.into())),
            "department" => Ok(Self::Department(value.into())),
            _ => Err(AppError::Validation(format!(
                "unknown assignee type '{kind}'"
            ))),
        }
    }

    /// Returns the stored type column.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Person(_) => "person",
            Self::Department(_) => "department",
        }
    }

    /// Returns the stored value column.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Person(value) | Self::Department(value) => value.as_str(),
        }
    }
}

/// Responsibility of an assignee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentKind {
    /// The single responsible party.
    Primary,
    /// A supporting party.
    Collaborator,
}

impl AssignmentKind {
    /// Returns a stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Collaborator => "collaborator",
        }
    }
}

impl FromStr for AssignmentKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "primary" => Ok(Self::Primary),
            "collaborator" => Ok(Self::Collaborator),
            _ => Err(AppError::Validation(format!(
                "unknown assignment kind '{value}'"
            ))),
        }
    }
}

/// One assignee attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAssignment {
    /// Task the assignee belongs to.
    pub task_id: TaskId,
    /// Assigned party.
    pub assignee: Assignee,
    /// Primary or collaborator.
    pub kind: AssignmentKind,
}

/// Validates an assignment set: at most one primary, no duplicated party.
pub fn validate_assignments(assignments: &[TaskAssignment]) -> AppResult<()> {
    let primary_count = assignments
        .iter()
        .filter(|assignment| assignment.kind == AssignmentKind::Primary)
        .count();
    if primary_count > 1 {
        return Err(AppError::Validation(format!(
            "a task has at most one primary assignee, got {primary_count}"
        )));
    }

    let mut seen = std::collections::HashSet::new();
    for assignment in assignments {
        if !seen.insert(&assignment.assignee) {
            return Err(AppError::Validation(format!(
                "assignee '{}' is listed more than once",
                assignment.assignee.value()
            )));
        }
    }

    Ok(())
}

/// Returns the employee code of the primary person assignee, if any.
#[must_use]
pub fn primary_person(assignments: &[TaskAssignment]) -> Option<&str> {
    assignments.iter().find_map(|assignment| match (&assignment.kind, &assignment.assignee) {
        (AssignmentKind::Primary, Assignee::Person(code)) => Some(code.as_str()),
        _ => None,
    })
}
