use std::str::FromStr;

use hrdesk_application::{RoleAssignmentEntry, SetRoleOverrideInput};
use hrdesk_core::AppResult;
use hrdesk_domain::{ModuleKey, PermissionAction, PermissionRule, RoleLevel, RoleOverride};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::{EffectiveRoleResponse, EmployeeResponse};

/// Explicit role assignment record.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-override-response.ts"
)]
pub struct RoleOverrideResponse {
    pub role_level: String,
    pub dept_scope: Option<String>,
    pub team_scope: Option<String>,
}

/// One row of the role assignment settings screen.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-assignment-response.ts"
)]
pub struct RoleAssignmentResponse {
    pub employee: EmployeeResponse,
    pub inferred_role: String,
    pub inferred_role_label: String,
    pub role_override: Option<RoleOverrideResponse>,
    pub effective: EffectiveRoleResponse,
}

/// Incoming payload for setting a role override.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/set-role-override-request.ts"
)]
pub struct SetRoleOverrideRequest {
    pub role_level: String,
    #[serde(default)]
    pub dept_scope: Option<String>,
    #[serde(default)]
    pub team_scope: Option<String>,
}

/// One permission matrix cell.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-rule-response.ts"
)]
pub struct PermissionRuleResponse {
    pub role_level: String,
    pub role_label: String,
    pub module: String,
    pub module_label: String,
    pub can_view: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

/// Flips one flag of one matrix cell.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/toggle-permission-request.ts"
)]
pub struct TogglePermissionRequest {
    pub role_level: String,
    pub module: String,
    /// `view`, `edit` or `delete`.
    pub action: String,
}

impl From<RoleOverride> for RoleOverrideResponse {
    fn from(value: RoleOverride) -> Self {
        Self {
            role_level: value.role_level().as_str().to_owned(),
            dept_scope: value.dept_scope().map(str::to_owned),
            team_scope: value.team_scope().map(str::to_owned),
        }
    }
}

impl From<RoleAssignmentEntry> for RoleAssignmentResponse {
    fn from(value: RoleAssignmentEntry) -> Self {
        Self {
            employee: EmployeeResponse::from(value.employee),
            inferred_role: value.inferred_role.as_str().to_owned(),
            inferred_role_label: value.inferred_role.label().to_owned(),
            role_override: value.role_override.map(RoleOverrideResponse::from),
            effective: EffectiveRoleResponse::from(value.effective),
        }
    }
}

impl From<PermissionRule> for PermissionRuleResponse {
    fn from(value: PermissionRule) -> Self {
        Self {
            role_level: value.role_level().as_str().to_owned(),
            role_label: value.role_level().label().to_owned(),
            module: value.module().as_str().to_owned(),
            module_label: value.module().label().to_owned(),
            can_view: value.can_view(),
            can_edit: value.can_edit(),
            can_delete: value.can_delete(),
        }
    }
}

impl SetRoleOverrideRequest {
    pub fn into_input(self) -> AppResult<SetRoleOverrideInput> {
        Ok(SetRoleOverrideInput {
            role_level: RoleLevel::from_transport(self.role_level.as_str())?,
            dept_scope: self.dept_scope,
            team_scope: self.team_scope,
        })
    }
}

impl TogglePermissionRequest {
    pub fn parse(&self) -> AppResult<(RoleLevel, ModuleKey, PermissionAction)> {
        Ok((
            RoleLevel::from_transport(self.role_level.as_str())?,
            ModuleKey::from_str(self.module.as_str())?,
            PermissionAction::from_str(self.action.as_str())?,
        ))
    }
}
