use std::str::FromStr;

use chrono::NaiveDate;
use hrdesk_application::{AssignmentInput, CreateTaskInput};
use hrdesk_core::{AppError, AppResult, trimmed_non_empty};
use hrdesk_domain::{
    Assignee, AssignmentKind, BoardColumn, Task, TaskAssignment, TaskAttachment, TaskCard,
    TaskDraft, TaskFilter, TaskPatch, TaskPriority, TaskProgress, TaskStatus,
};

use super::{
    BoardColumnResponse, CreateTaskRequest, TaskAssignmentDto, TaskAttachmentResponse,
    TaskCardResponse, TaskListQuery, TaskResponse, UpdateTaskRequest,
};

fn parse_due_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|error| AppError::Validation(format!("invalid due date '{value}': {error}")))
}

fn parse_optional_due_date(value: Option<String>) -> AppResult<Option<NaiveDate>> {
    trimmed_non_empty(value)
        .map(|value| parse_due_date(value.as_str()))
        .transpose()
}

impl From<Task> for TaskResponse {
    fn from(value: Task) -> Self {
        let status = value.status();
        let priority = value.priority();

        Self {
            task_id: value.task_id().to_string(),
            title: value.title().as_str().to_owned(),
            description: value.description().map(str::to_owned),
            status: status.as_str().to_owned(),
            status_label: status.label().to_owned(),
            status_tone: status.tone().as_str().to_owned(),
            priority: priority.as_str().to_owned(),
            priority_label: priority.label().to_owned(),
            priority_tone: priority.tone().as_str().to_owned(),
            progress: value.progress().value(),
            due_date: value.due_date().map(|date| date.format("%Y-%m-%d").to_string()),
            department: value.department().map(str::to_owned),
            team: value.team().map(str::to_owned),
            created_by: value.created_by().as_str().to_owned(),
            created_at: value.created_at().to_rfc3339(),
            updated_at: value.updated_at().to_rfc3339(),
        }
    }
}

impl From<TaskAssignment> for TaskAssignmentDto {
    fn from(value: TaskAssignment) -> Self {
        Self {
            assignee_type: value.assignee.kind().to_owned(),
            assignee_value: value.assignee.value().to_owned(),
            kind: value.kind.as_str().to_owned(),
        }
    }
}

impl TaskAssignmentDto {
    pub fn into_input(self) -> AppResult<AssignmentInput> {
        Ok(AssignmentInput {
            assignee: Assignee::from_parts(
                self.assignee_type.as_str(),
                self.assignee_value.as_str(),
            )?,
            kind: AssignmentKind::from_str(self.kind.as_str())?,
        })
    }
}

pub fn assignment_inputs(values: Vec<TaskAssignmentDto>) -> AppResult<Vec<AssignmentInput>> {
    values.into_iter().map(TaskAssignmentDto::into_input).collect()
}

impl From<TaskCard> for TaskCardResponse {
    fn from(value: TaskCard) -> Self {
        Self {
            task: TaskResponse::from(value.task),
            assignments: value
                .assignments
                .into_iter()
                .map(TaskAssignmentDto::from)
                .collect(),
        }
    }
}

impl From<BoardColumn> for BoardColumnResponse {
    fn from(value: BoardColumn) -> Self {
        Self {
            status: value.status.as_str().to_owned(),
            label: value.status.label().to_owned(),
            tone: value.status.tone().as_str().to_owned(),
            tasks: value.tasks.into_iter().map(TaskResponse::from).collect(),
        }
    }
}

impl From<TaskAttachment> for TaskAttachmentResponse {
    fn from(value: TaskAttachment) -> Self {
        Self {
            attachment_id: value.attachment_id().to_string(),
            task_id: value.task_id().to_string(),
            file_name: value.file_name().as_str().to_owned(),
            object_path: value.object_path().as_str().to_owned(),
            content_type: value.content_type().map(str::to_owned),
            size_bytes: value.size_bytes(),
            uploaded_by: value.uploaded_by().as_str().to_owned(),
            uploaded_at: value.uploaded_at().to_rfc3339(),
        }
    }
}

impl CreateTaskRequest {
    pub fn into_input(self) -> AppResult<CreateTaskInput> {
        let status = self
            .status
            .as_deref()
            .map(TaskStatus::from_str)
            .transpose()?
            .unwrap_or(TaskStatus::New);
        let priority = self
            .priority
            .as_deref()
            .map(TaskPriority::from_str)
            .transpose()?
            .unwrap_or(TaskPriority::Medium);

        Ok(CreateTaskInput {
            draft: TaskDraft {
                title: self.title,
                description: self.description,
                status,
                priority,
                progress: self.progress.unwrap_or(0),
                due_date: parse_optional_due_date(self.due_date)?,
                department: self.department,
                team: self.team,
            },
            assignments: assignment_inputs(self.assignments)?,
        })
    }
}

impl UpdateTaskRequest {
    pub fn into_patch(self) -> AppResult<TaskPatch> {
        Ok(TaskPatch {
            title: self.title,
            description: self.description,
            status: self
                .status
                .as_deref()
                .map(TaskStatus::from_str)
                .transpose()?,
            priority: self
                .priority
                .as_deref()
                .map(TaskPriority::from_str)
                .transpose()?,
            progress: self.progress.map(TaskProgress::new).transpose()?,
            due_date: self.due_date.map(parse_optional_due_date).transpose()?,
        })
    }
}

impl TaskListQuery {
    pub fn into_filter(self, caller_code: &str) -> AppResult<TaskFilter> {
        Ok(TaskFilter {
            status: trimmed_non_empty(self.status)
                .map(|value| TaskStatus::from_str(value.as_str()))
                .transpose()?,
            priority: trimmed_non_empty(self.priority)
                .map(|value| TaskPriority::from_str(value.as_str()))
                .transpose()?,
            assignee_code: trimmed_non_empty(self.assignee).map(|value| {
                if value == "me" {
                    caller_code.to_owned()
                } else {
                    value
                }
            }),
            search: trimmed_non_empty(self.search),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use hrdesk_domain::{TaskPriority, TaskProgress, TaskStatus};

    use super::super::{CreateTaskRequest, TaskListQuery, UpdateTaskRequest};

    #[test]
    fn create_request_defaults_to_new_medium_task() {
        let request = CreateTaskRequest {
            title: "Tổng hợp chấm công".to_owned(),
            description: None,
            status: None,
            priority: None,
            progress: None,
            due_date: Some("2026-11-30".to_owned()),
            department: Some("Nhân sự".to_owned()),
            team: None,
            assignments: Vec::new(),
        };

        let Ok(input) = request.into_input() else {
            panic!("request should convert");
        };
        assert_eq!(input.draft.status, TaskStatus::New);
        assert_eq!(input.draft.priority, TaskPriority::Medium);
        assert_eq!(input.draft.progress, 0);
        assert_eq!(input.draft.due_date, NaiveDate::from_ymd_opt(2026, 11, 30));
    }

    #[test]
    fn explicit_null_clears_due_date_while_absent_keeps_it() {
        let cleared: UpdateTaskRequest =
            serde_json::from_str(r#"{"due_date": null}"#).unwrap_or_default();
        let untouched: UpdateTaskRequest =
            serde_json::from_str(r#"{"progress": 40}"#).unwrap_or_default();

        let Ok(cleared) = cleared.into_patch() else {
            panic!("patch should convert");
        };
        let Ok(untouched) = untouched.into_patch() else {
            panic!("patch should convert");
        };

        assert_eq!(cleared.due_date, Some(None));
        assert_eq!(untouched.due_date, None);
        assert_eq!(untouched.progress, TaskProgress::new(40).ok());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let request = UpdateTaskRequest {
            status: Some("archived".to_owned()),
            ..UpdateTaskRequest::default()
        };

        assert!(request.into_patch().is_err());
    }

    #[test]
    fn me_filter_resolves_to_caller() {
        let query = TaskListQuery {
            assignee: Some("me".to_owned()),
            status: Some("  ".to_owned()),
            ..TaskListQuery::default()
        };

        let Ok(filter) = query.into_filter("NV007") else {
            panic!("query should convert");
        };
        assert_eq!(filter.assignee_code.as_deref(), Some("NV007"));
        assert_eq!(filter.status, None);
    }
}
