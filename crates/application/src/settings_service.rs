use std::collections::HashMap;
use std::sync::Arc;

use hrdesk_core::{AppError, AppResult, UserIdentity};
use hrdesk_domain::{
    EffectiveRole, Employee, ModuleKey, PermissionAction, PermissionRule, RoleLevel,
    RoleOverride, TargetContext,
};

use crate::{
    AuthorizationService, EmployeeRepository, PermissionMatrixEditor, PermissionRuleRepository,
    RoleOverrideRepository,
};


/// One row of the role assignment listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignmentEntry {
    /// Employee record.
    pub employee: Employee,
    /// Role inferred from the job title.
    pub inferred_role: RoleLevel,
    /// Explicit override, when one is stored.
    pub role_override: Option<RoleOverride>,
    /// Effective role and scopes.
    pub effective: EffectiveRole,
}

impl RoleAssignmentEntry {
    fn build(employee: Employee, role_override: Option<RoleOverride>) -> Self {
        let effective = EffectiveRole::resolve(&employee, role_override.as_ref());
        Self {
            inferred_role: employee.inferred_role(),
            employee,
            role_override,
            effective,
        }
    }
}

/// Input payload for storing a role override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetRoleOverrideInput {
    /// Role level to assign.
    pub role_level: RoleLevel,
    /// Optional department scope; blank falls back to the employee's department.
    pub dept_scope: Option<String>,
    /// Optional team scope; blank falls back to the employee's team.
    pub team_scope: Option<String>,
}

/// Organization settings: role assignments and the permission matrix.
#[derive(Clone)]
pub struct OrganizationSettingsService {
    authorization_service: AuthorizationService,
    employees: Arc<dyn EmployeeRepository>,
    overrides: Arc<dyn RoleOverrideRepository>,
    rules: Arc<dyn PermissionRuleRepository>,
}

impl OrganizationSettingsService {
    /// Creates a settings service from repository implementations.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        employees: Arc<dyn EmployeeRepository>,
        overrides: Arc<dyn RoleOverrideRepository>,
        rules: Arc<dyn PermissionRuleRepository>,
    ) -> Self {
        Self {
            authorization_service,
            employees,
            overrides,
            rules,
        }
    }

    /// Lists every employee with inferred, override and effective roles,
    /// ordered by effective role rank, then department, then name.
    pub async fn list_role_assignments(
        &self,
        identity: &UserIdentity,
    ) -> AppResult<Vec<RoleAssignmentEntry>> {
        self.require_settings(identity, PermissionAction::View)
            .await?;

        let mut overrides: HashMap<String, RoleOverride> = self
            .overrides
            .list_overrides()
            .await?
            .into_iter()
            .map(|role_override| {
                (
                    role_override.employee_code().as_str().to_owned(),
                    role_override,
                )
            })
            .collect();

        let mut entries: Vec<RoleAssignmentEntry> = self
            .employees
            .list_employees()
            .await?
            .into_iter()
            .map(|employee| {
                let role_override = overrides.remove(employee.employee_code().as_str());
                RoleAssignmentEntry::build(employee, role_override)
            })
            .collect();

        entries.sort_by(|left, right| {
            left.effective
                .role_level
                .rank()
                .cmp(&right.effective.role_level.rank())
                .then_with(|| left.employee.department().cmp(&right.employee.department()))
                .then_with(|| left.employee.full_name().cmp(right.employee.full_name()))
        });

        Ok(entries)
    }

    /// Stores or replaces the override of one employee.
    pub async fn set_override(
        &self,
        identity: &UserIdentity,
        employee_code: &str,
        input: SetRoleOverrideInput,
    ) -> AppResult<RoleAssignmentEntry> {
        let actor = self
            .require_settings(identity, PermissionAction::Edit)
            .await?;
        let employee = self
            .authorization_service
            .require_employee(employee_code)
            .await?;

        if actor.employee_code() == employee_code
            && actor.role.role_level == RoleLevel::SuperAdmin
            && input.role_level != RoleLevel::SuperAdmin
        {
            return Err(AppError::Conflict(
                "you cannot remove your own SUPER_ADMIN role".to_owned(),
            ));
        }
        if input.role_level == RoleLevel::SuperAdmin {
            require_super_admin(&actor, employee_code)?;
        }
        self.guard_stored_super_admin(&actor, employee_code).await?;

        let role_override = RoleOverride::new(
            employee_code,
            input.role_level,
            input.dept_scope,
            input.team_scope,
        )?;
        self.overrides.save_override(role_override.clone()).await?;

        Ok(RoleAssignmentEntry::build(employee, Some(role_override)))
    }

    /// Removes the override of one employee so the inferred role applies again.
    pub async fn clear_override(
        &self,
        identity: &UserIdentity,
        employee_code: &str,
    ) -> AppResult<RoleAssignmentEntry> {
        let actor = self
            .require_settings(identity, PermissionAction::Edit)
            .await?;
        let employee = self
            .authorization_service
            .require_employee(employee_code)
            .await?;

        if actor.employee_code() == employee_code
            && actor.role.role_level == RoleLevel::SuperAdmin
        {
            return Err(AppError::Conflict(
                "you cannot remove your own SUPER_ADMIN role".to_owned(),
            ));
        }
        self.guard_stored_super_admin(&actor, employee_code).await?;

        if !self.overrides.delete_override(employee_code).await? {
            return Err(AppError::NotFound(format!(
                "employee '{employee_code}' has no role override"
            )));
        }

        Ok(RoleAssignmentEntry::build(employee, None))
    }

    /// Returns the full grid of configurable roles by modules.
    pub async fn permission_matrix(
        &self,
        identity: &UserIdentity,
    ) -> AppResult<Vec<PermissionRule>> {
        self.require_settings(identity, PermissionAction::View)
            .await?;
        Ok(self.authorization_service.load_matrix().await?.grid())
    }

    /// Flips one capability flag of one matrix cell.
    pub async fn toggle_permission(
        &self,
        identity: &UserIdentity,
        role_level: RoleLevel,
        module: ModuleKey,
        action: PermissionAction,
    ) -> AppResult<PermissionRule> {
        self.require_settings(identity, PermissionAction::Edit)
            .await?;

        let mut editor = PermissionMatrixEditor::load(self.rules.clone()).await?;
        editor.toggle(role_level, module, action).await
    }

    async fn guard_stored_super_admin(
        &self,
        actor: &crate::Actor,
        employee_code: &str,
    ) -> AppResult<()> {
        let stored = self.overrides.find_override(employee_code).await?;
        if stored.is_some_and(|role_override| role_override.role_level() == RoleLevel::SuperAdmin)
        {
            require_super_admin(actor, employee_code)?;
        }

        Ok(())
    }

    async fn require_settings(
        &self,
        identity: &UserIdentity,
        action: PermissionAction,
    ) -> AppResult<crate::Actor> {
        self.authorization_service
            .authorize(identity, action, &TargetContext::module(ModuleKey::Settings))
            .await
    }
}

/// SUPER_ADMIN can only be granted or revoked by another SUPER_ADMIN.
fn require_super_admin(actor: &crate::Actor, employee_code: &str) -> AppResult<()> {
    if actor.context.is_super_admin() {
        return Ok(());
    }

    Err(AppError::Forbidden(format!(
        "only SUPER_ADMIN may change the SUPER_ADMIN role of '{employee_code}'"
    )))
}
