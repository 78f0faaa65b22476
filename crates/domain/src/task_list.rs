use std::cmp::Ordering;

use crate::{
    Assignee, ModuleKey, Task, TaskAssignment, TaskPriority, TaskStatus, TargetContext,
    primary_person,
};

/// A task together with its assignees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    /// Task record.
    pub task: Task,
    /// Primary and collaborator assignees.
    pub assignments: Vec<TaskAssignment>,
}

impl TaskCard {
    /// Returns the record access checks run against: the task's department
    /// and team, owned by the primary person assignee or else the creator.
    #[must_use]
    pub fn target(&self) -> TargetContext {
        let owner = primary_person(&self.assignments).unwrap_or(self.task.created_by().as_str());

        TargetContext {
            module: ModuleKey::Tasks,
            department: self.task.department().map(str::to_owned),
            team: self.task.team().map(str::to_owned),
            employee_code: Some(owner.to_owned()),
        }
    }
}

/// Task list filters taken from the list toolbar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Only tasks in this status.
    pub status: Option<TaskStatus>,
    /// Only tasks with this priority.
    pub priority: Option<TaskPriority>,
    /// Only tasks where this employee code is an assignee.
    pub assignee_code: Option<String>,
    /// Case-insensitive text matched against title and description.
    pub search: Option<String>,
}

impl TaskFilter {
    /// Returns whether a card passes every filter that is set.
    #[must_use]
    pub fn matches(&self, card: &TaskCard) -> bool {
        if self.status.is_some_and(|status| card.task.status() != status) {
            return false;
        }
        if self
            .priority
            .is_some_and(|priority| card.task.priority() != priority)
        {
            return false;
        }
        if let Some(code) = self.assignee_code.as_deref() {
            let assigned = card
                .assignments
                .iter()
                .any(|assignment| matches!(&assignment.assignee, Assignee::Person(value) if value == code));
            if !assigned {
                return false;
            }
        }
        if let Some(search) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            let needle = search.to_lowercase();
            let in_title = card.task.title().as_str().to_lowercase().contains(&needle);
            let in_description = card
                .task
                .description()
                .is_some_and(|value| value.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }

        true
    }
}

/// Orders cards by due date (undated last), then by creation time.
pub fn sort_task_cards(cards: &mut [TaskCard]) {
    cards.sort_by(|left, right| compare_tasks(&left.task, &right.task));
}

fn compare_tasks(left: &Task, right: &Task) -> Ordering {
    match (left.due_date(), right.due_date()) {
        (Some(left_due), Some(right_due)) => left_due.cmp(&right_due),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| left.created_at().cmp(&right.created_at()))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};

    use super::{TaskCard, TaskFilter, sort_task_cards};
    use crate::{
        Assignee, AssignmentKind, Task, TaskAssignment, TaskDraft, TaskId, TaskPriority,
        TaskStatus,
    };

    fn card(title: &str, due: Option<NaiveDate>, offset_minutes: i64) -> Option<TaskCard> {
        let task_id = TaskId::new();
        let task = Task::create(
            task_id,
            TaskDraft {
                title: title.to_owned(),
                description: Some("Tổng hợp số liệu chấm công".to_owned()),
                status: TaskStatus::New,
                priority: TaskPriority::High,
                progress: 10,
                due_date: due,
                department: None,
                team: None,
            },
            "NV001",
            Utc::now() + Duration::minutes(offset_minutes),
        )
        .ok()?;

        Some(TaskCard {
            task,
            assignments: vec![TaskAssignment {
                task_id,
                assignee: Assignee::Person("NV002".to_owned()),
                kind: AssignmentKind::Primary,
            }],
        })
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let Some(card) = card("Báo cáo tháng", None, 0) else {
            panic!("fixture card must be valid");
        };
        let filter = |search: &str| TaskFilter {
            search: Some(search.to_owned()),
            ..TaskFilter::default()
        };
        assert!(filter("BÁO CÁO").matches(&card));
        assert!(filter("chấm công").matches(&card));
        assert!(!filter("tuyển dụng").matches(&card));
    }

    #[test]
    fn status_priority_and_assignee_filters_apply() {
        let Some(card) = card("Báo cáo tháng", None, 0) else {
            panic!("fixture card must be valid");
        };
        assert!(TaskFilter {
            status: Some(TaskStatus::New),
            priority: Some(TaskPriority::High),
            assignee_code: Some("NV002".to_owned()),
            search: None,
        }
        .matches(&card));
        assert!(!TaskFilter {
            status: Some(TaskStatus::Done),
            ..TaskFilter::default()
        }
        .matches(&card));
        assert!(!TaskFilter {
            assignee_code: Some("NV009".to_owned()),
            ..TaskFilter::default()
        }
        .matches(&card));
    }

    #[test]
    fn cards_sort_by_due_date_then_creation() {
        let early = NaiveDate::from_ymd_opt(2026, 1, 5);
        let late = NaiveDate::from_ymd_opt(2026, 3, 1);
        let mut cards: Vec<TaskCard> = [
            card("undated", None, 0),
            card("late", late, 1),
            card("early", early, 2),
        ]
        .into_iter()
        .flatten()
        .collect();

        sort_task_cards(&mut cards);
        let titles: Vec<&str> = cards.iter().map(|card| card.task.title().as_str()).collect();
        assert_eq!(titles, vec!["early", "late", "undated"]);
    }

    #[test]
    fn target_owner_falls_back_to_creator() {
        let Some(mut card) = card("Báo cáo tháng", None, 0) else {
            panic!("fixture card must be valid");
        };
        assert_eq!(card.target().employee_code.as_deref(), Some("NV002"));

        card.assignments.clear();
        assert_eq!(card.target().employee_code.as_deref(), Some("NV001"));
        assert_eq!(card.target().module, crate::ModuleKey::Tasks);
    }
}
