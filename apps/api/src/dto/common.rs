use hrdesk_domain::{
    BadgeTone, EffectiveRole, Employee, ModuleKey, RoleLevel, TaskPriority, TaskStatus,
};
use serde::Serialize;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ready: bool,
    pub postgres: HealthDependencyStatus,
}

/// One runtime dependency health status.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-dependency-status.ts"
)]
pub struct HealthDependencyStatus {
    pub status: &'static str,
    pub detail: Option<String>,
}

/// Status or priority value with its badge styling.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/badge-entry-response.ts"
)]
pub struct BadgeEntryResponse {
    pub key: String,
    pub label: String,
    pub tone: String,
}

/// Key with a display label.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/label-entry-response.ts"
)]
pub struct LabelEntryResponse {
    pub key: String,
    pub label: String,
}

/// Fixed vocabulary used for filters, badges, and drag targets.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/vocabulary-response.ts"
)]
pub struct VocabularyResponse {
    pub statuses: Vec<BadgeEntryResponse>,
    pub priorities: Vec<BadgeEntryResponse>,
    pub modules: Vec<LabelEntryResponse>,
    pub role_levels: Vec<LabelEntryResponse>,
}

/// Directory entry of one employee.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/employee-response.ts"
)]
pub struct EmployeeResponse {
    pub employee_code: String,
    pub full_name: String,
    pub department: Option<String>,
    pub team: Option<String>,
    pub job_title: Option<String>,
    pub email: Option<String>,
}

/// Effective role of an employee with its scopes.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/effective-role-response.ts"
)]
pub struct EffectiveRoleResponse {
    pub role_level: String,
    pub role_label: String,
    pub dept_scope: Option<String>,
    pub team_scope: Option<String>,
    pub source: String,
}

fn badge(key: &str, label: &str, tone: BadgeTone) -> BadgeEntryResponse {
    BadgeEntryResponse {
        key: key.to_owned(),
        label: label.to_owned(),
        tone: tone.as_str().to_owned(),
    }
}

impl VocabularyResponse {
    pub fn build() -> Self {
        Self {
            statuses: TaskStatus::all()
                .iter()
                .map(|status| badge(status.as_str(), status.label(), status.tone()))
                .collect(),
            priorities: TaskPriority::all()
                .iter()
                .map(|priority| badge(priority.as_str(), priority.label(), priority.tone()))
                .collect(),
            modules: ModuleKey::all()
                .iter()
                .map(|module| LabelEntryResponse {
                    key: module.as_str().to_owned(),
                    label: module.label().to_owned(),
                })
                .collect(),
            role_levels: RoleLevel::all()
                .iter()
                .map(|role_level| LabelEntryResponse {
                    key: role_level.as_str().to_owned(),
                    label: role_level.label().to_owned(),
                })
                .collect(),
        }
    }
}

impl From<Employee> for EmployeeResponse {
    fn from(value: Employee) -> Self {
        Self {
            employee_code: value.employee_code().as_str().to_owned(),
            full_name: value.full_name().as_str().to_owned(),
            department: value.department().map(str::to_owned),
            team: value.team().map(str::to_owned),
            job_title: value.job_title().map(str::to_owned),
            email: value.email().map(str::to_owned),
        }
    }
}

impl From<EffectiveRole> for EffectiveRoleResponse {
    fn from(value: EffectiveRole) -> Self {
        Self {
            role_level: value.role_level.as_str().to_owned(),
            role_label: value.role_level.label().to_owned(),
            dept_scope: value.dept_scope,
            team_scope: value.team_scope,
            source: value.source.as_str().to_owned(),
        }
    }
}
