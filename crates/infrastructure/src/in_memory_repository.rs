use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use hrdesk_application::{
    AttachmentRepository, EmployeeRepository, GradeRepository, ObjectStorage,
    PermissionRuleRepository, RoleOverrideRepository, TaskRepository,
};
use hrdesk_core::{AppError, AppResult};
use hrdesk_domain::{
    Employee, Grade, GradePeriod, ModuleKey, PermissionRule, RoleLevel, RoleOverride, Task,
    TaskAssignment, TaskAttachment, TaskId, TaskPatch,
};
use tokio::sync::RwLock;

/// In-memory implementation of every repository and storage port.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    employees: RwLock<BTreeMap<String, Employee>>,
    overrides: RwLock<BTreeMap<String, RoleOverride>>,
    rules: RwLock<BTreeMap<(RoleLevel, ModuleKey), PermissionRule>>,
    tasks: RwLock<HashMap<TaskId, Task>>,
    assignments: RwLock<Vec<TaskAssignment>>,
    attachments: RwLock<Vec<TaskAttachment>>,
    objects: RwLock<HashMap<String, Vec<u8>>>,
    grades: RwLock<Vec<Grade>>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces directory entries.
    pub async fn insert_employees(&self, employees: impl IntoIterator<Item = Employee>) {
        let mut stored = self.employees.write().await;
        for employee in employees {
            stored.insert(employee.employee_code().as_str().to_owned(), employee);
        }
    }

    /// Adds or replaces permission rules.
    pub async fn insert_rules(&self, rules: impl IntoIterator<Item = PermissionRule>) {
        let mut stored = self.rules.write().await;
        for rule in rules {
            stored.insert((rule.role_level(), rule.module()), rule);
        }
    }

    /// Returns the bytes stored at an object path.
    pub async fn object(&self, object_path: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(object_path).cloned()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryRepository {
    async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        Ok(self.employees.read().await.values().cloned().collect())
    }

    async fn find_employee(&self, employee_code: &str) -> AppResult<Option<Employee>> {
        Ok(self.employees.read().await.get(employee_code).cloned())
    }
}

#[async_trait]
impl RoleOverrideRepository for InMemoryRepository {
    async fn list_overrides(&self) -> AppResult<Vec<RoleOverride>> {
        Ok(self.overrides.read().await.values().cloned().collect())
    }

    async fn find_override(&self, employee_code: &str) -> AppResult<Option<RoleOverride>> {
        Ok(self.overrides.read().await.get(employee_code).cloned())
    }

    async fn save_override(&self, role_override: RoleOverride) -> AppResult<()> {
        let code = role_override.employee_code().as_str().to_owned();
        if !self.employees.read().await.contains_key(&code) {
            return Err(AppError::NotFound(format!("employee '{code}' does not exist")));
        }

        self.overrides.write().await.insert(code, role_override);
        Ok(())
    }

    async fn delete_override(&self, employee_code: &str) -> AppResult<bool> {
        Ok(self.overrides.write().await.remove(employee_code).is_some())
    }
}

#[async_trait]
impl PermissionRuleRepository for InMemoryRepository {
    async fn list_rules(&self) -> AppResult<Vec<PermissionRule>> {
        Ok(self.rules.read().await.values().copied().collect())
    }

    async fn save_rule(&self, rule: PermissionRule) -> AppResult<()> {
        self.rules
            .write()
            .await
            .insert((rule.role_level(), rule.module()), rule);
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryRepository {
    async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self.tasks.read().await.values().cloned().collect();
        tasks.sort_by_key(|task| std::cmp::Reverse(task.created_at()));
        Ok(tasks)
    }

    async fn find_task(&self, task_id: TaskId) -> AppResult<Option<Task>> {
        Ok(self.tasks.read().await.get(&task_id).cloned())
    }

    async fn insert_task(&self, task: Task) -> AppResult<()> {
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&task.task_id()) {
            return Err(AppError::Conflict(format!(
                "task '{}' already exists",
                task.task_id()
            )));
        }

        tasks.insert(task.task_id(), task);
        Ok(())
    }

    async fn update_task(&self, task_id: TaskId, patch: TaskPatch) -> AppResult<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .get_mut(&task_id)
            .ok_or_else(|| AppError::NotFound(format!("task '{task_id}' does not exist")))?;

        task.apply(&patch, chrono::Utc::now())?;
        Ok(task.clone())
    }

    async fn delete_task(&self, task_id: TaskId) -> AppResult<()> {
        if self.tasks.write().await.remove(&task_id).is_none() {
            return Err(AppError::NotFound(format!(
                "task '{task_id}' does not exist"
            )));
        }

        self.assignments
            .write()
            .await
            .retain(|assignment| assignment.task_id != task_id);
        self.attachments
            .write()
            .await
            .retain(|attachment| attachment.task_id() != task_id);
        Ok(())
    }

    async fn list_assignments(&self, task_ids: &[TaskId]) -> AppResult<Vec<TaskAssignment>> {
        Ok(self
            .assignments
            .read()
            .await
            .iter()
            .filter(|assignment| task_ids.contains(&assignment.task_id))
            .cloned()
            .collect())
    }

    async fn insert_assignments(&self, assignments: Vec<TaskAssignment>) -> AppResult<()> {
        let mut stored = self.assignments.write().await;
        for assignment in &assignments {
            if stored.iter().any(|existing| {
                existing.task_id == assignment.task_id && existing.assignee == assignment.assignee
            }) {
                return Err(AppError::Conflict(format!(
                    "assignee '{}' is already assigned",
                    assignment.assignee.value()
                )));
            }
        }

        stored.extend(assignments);
        Ok(())
    }

    async fn delete_assignments(&self, task_id: TaskId) -> AppResult<()> {
        self.assignments
            .write()
            .await
            .retain(|assignment| assignment.task_id != task_id);
        Ok(())
    }
}

#[async_trait]
impl AttachmentRepository for InMemoryRepository {
    async fn list_attachments(&self, task_id: TaskId) -> AppResult<Vec<TaskAttachment>> {
        Ok(self
            .attachments
            .read()
            .await
            .iter()
            .filter(|attachment| attachment.task_id() == task_id)
            .cloned()
            .collect())
    }

    async fn insert_attachment(&self, attachment: TaskAttachment) -> AppResult<()> {
        self.attachments.write().await.push(attachment);
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for InMemoryRepository {
    async fn ensure_bucket(&self) -> AppResult<()> {
        Ok(())
    }

    async fn upload_object(
        &self,
        object_path: &str,
        bytes: Vec<u8>,
        _content_type: Option<&str>,
    ) -> AppResult<()> {
        self.objects
            .write()
            .await
            .insert(object_path.to_owned(), bytes);
        Ok(())
    }

    async fn remove_object(&self, object_path: &str) -> AppResult<()> {
        self.objects.write().await.remove(object_path);
        Ok(())
    }
}

#[async_trait]
impl GradeRepository for InMemoryRepository {
    async fn save_grade(&self, grade: Grade) -> AppResult<Grade> {
        let mut grades = self.grades.write().await;
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
            .read()
            .await
            .iter()
            .filter(|grade| grade.grader_code().as_str() == grader_code)
            .filter(|grade| period.is_none_or(|period| grade.period() == period))
            .cloned()
            .collect())
    }
}
