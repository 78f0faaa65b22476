//! Fakes shared by the service tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use hrdesk_core::{AppError, AppResult, UserIdentity};
use hrdesk_domain::{
    Employee, Grade, GradePeriod, ModuleKey, PermissionRule, RoleLevel, RoleOverride, Task,
    TaskAssignment, TaskAttachment, TaskId, TaskPatch,
};
use tokio::sync::Mutex;

use crate::{
    AttachmentRepository, AuthorizationService, EmployeeRepository, GradeRepository,
    ObjectStorage, PermissionRuleRepository, RoleOverrideRepository, TaskRepository,
};

pub(crate) fn employee(code: &str, title: &str, department: &str, team: &str) -> Employee {
    match Employee::new(
        code,
        format!("Nhân viên {code}"),
        Some(department.to_owned()),
        Some(team.to_owned()),
        Some(title.to_owned()),
        None,
    ) {
        Ok(employee) => employee,
        Err(error) => panic!("invalid fixture employee '{code}': {error}"),
    }
}

pub(crate) fn identity(code: &str) -> UserIdentity {
    UserIdentity::new(code, code, None)
}

pub(crate) fn rule(
    role_level: RoleLevel,
    module: ModuleKey,
    can_view: bool,
    can_edit: bool,
    can_delete: bool,
) -> PermissionRule {
    match PermissionRule::new(role_level, module, can_view, can_edit, can_delete) {
        Ok(rule) => rule,
        Err(error) => panic!("invalid fixture rule: {error}"),
    }
}

/// Employee directory, overrides, and permission rules in one fake.
#[derive(Default)]
pub(crate) struct FakeDirectory {
    pub employees: Mutex<Vec<Employee>>,
    pub overrides: Mutex<HashMap<String, RoleOverride>>,
    pub rules: Mutex<Vec<PermissionRule>>,
    pub saved_rules: Mutex<Vec<PermissionRule>>,
    pub fail_rule_writes: AtomicBool,
}

impl FakeDirectory {
    pub(crate) fn with(employees: Vec<Employee>, rules: Vec<PermissionRule>) -> Arc<Self> {
        Arc::new(Self {
            employees: Mutex::new(employees),
            rules: Mutex::new(rules),
            ..Self::default()
        })
    }

    pub(crate) async fn add_override(&self, role_override: RoleOverride) {
        self.overrides
            .lock()
            .await
            .insert(role_override.employee_code().as_str().to_owned(), role_override);
    }

    pub(crate) fn authorization_service(self: &Arc<Self>) -> AuthorizationService {
        AuthorizationService::new(self.clone(), self.clone(), self.clone())
    }
}

#[async_trait]
impl EmployeeRepository for FakeDirectory {
    async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        Ok(self.employees.lock().await.clone())
    }

    async fn find_employee(&self, employee_code: &str) -> AppResult<Option<Employee>> {
        Ok(self
            .employees
            .lock()
            .await
            .iter()
            .find(|employee| employee.employee_code().as_str() == employee_code)
            .cloned())
    }
}

#[async_trait]
impl RoleOverrideRepository for FakeDirectory {
    async fn list_overrides(&self) -> AppResult<Vec<RoleOverride>> {
        Ok(self.overrides.lock().await.values().cloned().collect())
    }

    async fn find_override(&self, employee_code: &str) -> AppResult<Option<RoleOverride>> {
        Ok(self.overrides.lock().await.get(employee_code).cloned())
    }

    async fn save_override(&self, role_override: RoleOverride) -> AppResult<()> {
        self.add_override(role_override).await;
        Ok(())
    }

    async fn delete_override(&self, employee_code: &str) -> AppResult<bool> {
        Ok(self.overrides.lock().await.remove(employee_code).is_some())
    }
}

#[async_trait]
impl PermissionRuleRepository for FakeDirectory {
    async fn list_rules(&self) -> AppResult<Vec<PermissionRule>> {
        Ok(self.rules.lock().await.clone())
    }

    async fn save_rule(&self, rule: PermissionRule) -> AppResult<()> {
        if self.fail_rule_writes.load(Ordering::SeqCst) {
            return Err(AppError::Internal("permission_rules write rejected".to_owned()));
        }

        self.saved_rules.lock().await.push(rule);
        let mut rules = self.rules.lock().await;
        rules.retain(|stored| {
            (stored.role_level(), stored.module()) != (rule.role_level(), rule.module())
        });
        rules.push(rule);
        Ok(())
    }
}

/// Task store that records every update call.
#[derive(Default)]
pub(crate) struct FakeTaskRepository {
    pub tasks: Mutex<Vec<Task>>,
    pub assignments: Mutex<Vec<TaskAssignment>>,
    pub updates: Mutex<Vec<(TaskId, TaskPatch)>>,
    pub fail_assignment_inserts: AtomicBool,
    pub fail_updates: AtomicBool,
}

#[async_trait]
impl TaskRepository for FakeTaskRepository {
    async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        Ok(self.tasks.lock().await.clone())
    }

    async fn find_task(&self, task_id: TaskId) -> AppResult<Option<Task>> {
        Ok(self
            .tasks
            .lock()
            .await
            .iter()
            .find(|task| task.task_id() == task_id)
            .cloned())
    }

    async fn insert_task(&self, task: Task) -> AppResult<()> {
        self.tasks.lock().await.push(task);
        Ok(())
    }

    async fn update_task(&self, task_id: TaskId, patch: TaskPatch) -> AppResult<Task> {
        self.updates.lock().await.push((task_id, patch.clone()));
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::Internal("tasks update rejected".to_owned()));
        }

        let mut tasks = self.tasks.lock().await;
        let task = tasks
            .iter_mut()
            .find(|task| task.task_id() == task_id)
            .ok_or_else(|| AppError::NotFound(format!("task '{task_id}' does not exist")))?;
        task.apply(&patch, chrono::Utc::now())?;
        Ok(task.clone())
    }

    async fn delete_task(&self, task_id: TaskId) -> AppResult<()> {
        self.tasks.lock().await.retain(|task| task.task_id() != task_id);
        self.assignments
            .lock()
            .await
            .retain(|assignment| assignment.task_id != task_id);
        Ok(())
    }

    async fn list_assignments(&self, task_ids: &[TaskId]) -> AppResult<Vec<TaskAssignment>> {
        Ok(self
            .assignments
            .lock()
            .await
            .iter()
            .filter(|assignment| task_ids.contains(&assignment.task_id))
            .cloned()
            .collect())
    }

    async fn insert_assignments(&self, assignments: Vec<TaskAssignment>) -> AppResult<()> {
        if self.fail_assignment_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Internal(
                "task_assignments insert rejected".to_owned(),
            ));
        }

        self.assignments.lock().await.extend(assignments);
        Ok(())
    }

    async fn delete_assignments(&self, task_id: TaskId) -> AppResult<()> {
        self.assignments
            .lock()
            .await
            .retain(|assignment| assignment.task_id != task_id);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeAttachmentStore {
    pub attachments: Mutex<Vec<TaskAttachment>>,
    pub objects: Mutex<HashMap<String, Vec<u8>>>,
    pub fail_uploads: AtomicBool,
    pub fail_inserts: AtomicBool,
    pub fail_removals: AtomicBool,
}

#[async_trait]
impl AttachmentRepository for FakeAttachmentStore {
    async fn list_attachments(&self, task_id: TaskId) -> AppResult<Vec<TaskAttachment>> {
        Ok(self
            .attachments
            .lock()
            .await
            .iter()
            .filter(|attachment| attachment.task_id() == task_id)
            .cloned()
            .collect())
    }

    async fn insert_attachment(&self, attachment: TaskAttachment) -> AppResult<()> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Internal("task_attachments insert rejected".to_owned()));
        }

        self.attachments.lock().await.push(attachment);
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for FakeAttachmentStore {
    async fn ensure_bucket(&self) -> AppResult<()> {
        Ok(())
    }

    async fn upload_object(
        &self,
        object_path: &str,
        bytes: Vec<u8>,
        _content_type: Option<&str>,
    ) -> AppResult<()> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(AppError::NotProvisioned(
                "storage bucket 'task-attachments' not found".to_owned(),
            ));
        }

        self.objects
            .lock()
            .await
            .insert(object_path.to_owned(), bytes);
        Ok(())
    }

    async fn remove_object(&self, object_path: &str) -> AppResult<()> {
        if self.fail_removals.load(Ordering::SeqCst) {
            return Err(AppError::Internal("object removal rejected".to_owned()));
        }

        self.objects.lock().await.remove(object_path);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeGradeRepository {
    pub grades: Mutex<Vec<Grade>>,
}

#[async_trait]
impl GradeRepository for FakeGradeRepository {
    async fn save_grade(&self, grade: Grade) -> AppResult<Grade> {
        let mut grades = self.grades.lock().await;
        grades.retain(|stored| {
            (stored.grader_code(), stored.target_code(), stored.period())
                != (grade.grader_code(), grade.target_code(), grade.period())
        });
        grades.push(grade.clone());
        Ok(grade)
    }

    async fn list_grades_by_grader(
        &self,
        grader_code: &str,
        period: Option<&GradePeriod>,
    ) -> AppResult<Vec<Grade>> {
        Ok(self
            .grades
            .lock()
            .await
            .iter()
            .filter(|grade| grade.grader_code().as_str() == grader_code)
            .filter(|grade| period.is_none_or(|period| grade.period() == period))
            .cloned()
            .collect())
    }
}
