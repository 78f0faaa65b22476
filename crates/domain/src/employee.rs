use hrdesk_core::{AppResult, NonEmptyString, trimmed_non_empty};
use serde::{Deserialize, Serialize};

use crate::{RoleLevel, infer_role_level};

/// Employee record imported from the HR system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    employee_code: NonEmptyString,
    full_name: NonEmptyString,
    department: Option<String>,
    team: Option<String>,
    job_title: Option<String>,
    email: Option<String>,
}

impl Employee {
    /// Creates a validated employee record.
    pub fn new(
        employee_code: impl Into<String>,
        full_name: impl Into<String>,
        department: Option<String>,
        team: Option<String>,
        job_title: Option<String>,
        email: Option<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            employee_code: NonEmptyString::new(employee_code)?,
            full_name: NonEmptyString::new(full_name)?,
            department: trimmed_non_empty(department),
            team: trimmed_non_empty(team),
            job_title: trimmed_non_empty(job_title),
            email: trimmed_non_empty(email),
        })
    }

    /// Returns the unique employee code.
    #[must_use]
    pub fn employee_code(&self) -> &NonEmptyString {
        &self.employee_code
    }

    /// Returns the employee full name.
    #[must_use]
    pub fn full_name(&self) -> &NonEmptyString {
        &self.full_name
    }

    /// Returns the department the employee belongs to.
    #[must_use]
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    /// Returns the team the employee belongs to.
    #[must_use]
    pub fn team(&self) -> Option<&str> {
        self.team.as_deref()
    }

    /// Returns the current job title.
    #[must_use]
    pub fn job_title(&self) -> Option<&str> {
        self.job_title.as_deref()
    }

    /// Returns the work email.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the role implied by the job title.
    #[must_use]
    pub fn inferred_role(&self) -> RoleLevel {
        infer_role_level(self.job_title())
    }
}

/// Explicit role assignment that replaces the inferred role of one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleOverride {
    employee_code: NonEmptyString,
    role_level: RoleLevel,
    dept_scope: Option<String>,
    team_scope: Option<String>,
}

impl RoleOverride {
    /// Creates a validated role override.
    pub fn new(
        employee_code: impl Into<String>,
        role_level: RoleLevel,
        dept_scope: Option<String>,
        team_scope: Option<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            employee_code: NonEmptyString::new(employee_code)?,
            role_level,
            dept_scope: trimmed_non_empty(dept_scope),
            team_scope: trimmed_non_empty(team_scope),
        })
    }

    /// Returns the overridden employee code.
    #[must_use]
    pub fn employee_code(&self) -> &NonEmptyString {
        &self.employee_code
    }

    /// Returns the assigned role level.
    #[must_use]
    pub fn role_level(&self) -> RoleLevel {
        self.role_level
    }

    /// Returns the explicit department scope.
    #[must_use]
    pub fn dept_scope(&self) -> Option<&str> {
        self.dept_scope.as_deref()
    }

    /// Returns the explicit team scope.
    #[must_use]
    pub fn team_scope(&self) -> Option<&str> {
        self.team_scope.as_deref()
    }
}

/// Where an effective role came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleSource {
    /// Inferred from the job title.
    Inferred,
    /// Taken from an explicit override record.
    Override,
}

impl RoleSource {
    /// Returns a stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inferred => "inferred",
            Self::Override => "override",
        }
    }
}

/// The single effective role of an employee with its scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveRole {
    /// Effective role level.
    pub role_level: RoleLevel,
    /// Department scope used for DEPT_HEAD checks.
    pub dept_scope: Option<String>,
    /// Team scope used for TEAM_LEADER checks.
    pub team_scope: Option<String>,
    /// Origin of the role level.
    pub source: RoleSource,
}

impl EffectiveRole {
    /// Resolves the effective role: an override wins over inference, and blank
    /// override scopes fall back to the employee's own department and team.
    #[must_use]
    pub fn resolve(employee: &Employee, role_override: Option<&RoleOverride>) -> Self {
        match role_override {
            Some(role_override) => Self {
                role_level: role_override.role_level(),
                dept_scope: role_override
                    .dept_scope()
                    .or(employee.department())
                    .map(str::to_owned),
                team_scope: role_override
                    .team_scope()
                    .or(employee.team())
                    .map(str::to_owned),
                source: RoleSource::Override,
            },
            None => Self {
                role_level: employee.inferred_role(),
                dept_scope: employee.department().map(str::to_owned),
                team_scope: employee.team().map(str::to_owned),
                source: RoleSource::Inferred,
            },
        }
    }
}
