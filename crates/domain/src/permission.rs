use std::collections::BTreeMap;
use std::str::FromStr;

use hrdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::RoleLevel;

/// Feature area that permissions are checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKey {
    /// Task tracker (board and list).
    Tasks,
    /// Shared calendar.
    Calendar,
    /// Performance grading.
    Grading,
    /// Employee directory.
    Employees,
    /// Reports and exports.
    Reports,
    /// Organization settings.
    Settings,
}

impl ModuleKey {
    /// Returns a stable storage value for this module.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Calendar => "calendar",
            Self::Grading => "grading",
            Self::Employees => "employees",
            Self::Reports => "reports",
            Self::Settings => "settings",
        }
    }

    /// Returns the label shown in the permission matrix header.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tasks => "Công việc",
            Self::Calendar => "Lịch",
            Self::Grading => "Đánh giá",
            Self::Employees => "Nhân sự",
            Self::Reports => "Báo cáo",
            Self::Settings => "Cài đặt",
        }
    }

    /// Whether the module only has organization-wide records, so it is
    /// checked against a target without department, team, or employee and
    /// scoped roles never pass.
    #[must_use]
    pub fn is_organization_wide(&self) -> bool {
        matches!(self, Self::Settings)
    }

    /// Returns all known modules.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[ModuleKey] = &[
            ModuleKey::Tasks,
            ModuleKey::Calendar,
            ModuleKey::Grading,
            ModuleKey::Employees,
            ModuleKey::Reports,
            ModuleKey::Settings,
        ];

        ALL
    }
}

impl FromStr for ModuleKey {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "tasks" => Ok(Self::Tasks),
            "calendar" => Ok(Self::Calendar),
            "grading" => Ok(Self::Grading),
            "employees" => Ok(Self::Employees),
            "reports" => Ok(Self::Reports),
            "settings" => Ok(Self::Settings),
            _ => Err(AppError::Validation(format!(
                "unknown module key '{value}'"
            ))),
        }
    }
}

/// Capability checked against a permission rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
    /// Read access (`can_view`).
    View,
    /// Mutation access (`can_edit`).
    Edit,
    /// Removal access (`can_delete`).
    Delete,
}

impl PermissionAction {
    /// Returns stable action name for error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

impl FromStr for PermissionAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "view" | "can_view" => Ok(Self::View),
            "edit" | "can_edit" => Ok(Self::Edit),
            "delete" | "can_delete" => Ok(Self::Delete),
            _ => Err(AppError::Validation(format!(
                "unknown permission action '{value}'"
            ))),
        }
    }
}

/// Capability flags of one role level for one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRule {
    role_level: RoleLevel,
    module: ModuleKey,
    can_view: bool,
    can_edit: bool,
    can_delete: bool,
}

impl PermissionRule {
    /// Creates a permission rule. SUPER_ADMIN rights are implicit and are never
    /// stored as a rule.
    pub fn new(
        role_level: RoleLevel,
        module: ModuleKey,
        can_view: bool,
        can_edit: bool,
        can_delete: bool,
    ) -> AppResult<Self> {
        if role_level == RoleLevel::SuperAdmin {
            return Err(AppError::Validation(
                "SUPER_ADMIN permissions are implicit and cannot be stored".to_owned(),
            ));
        }

        Ok(Self {
            role_level,
            module,
            can_view,
            can_edit,
            can_delete,
        })
    }

    /// Returns an all-false rule used for cells without a stored row.
    fn denied(role_level: RoleLevel, module: ModuleKey) -> Self {
        Self {
            role_level,
            module,
            can_view: false,
            can_edit: false,
            can_delete: false,
        }
    }

    /// Returns the role level this rule applies to.
    #[must_use]
    pub fn role_level(&self) -> RoleLevel {
        self.role_level
    }

    /// Returns the module this rule applies to.
    #[must_use]
    pub fn module(&self) -> ModuleKey {
        self.module
    }

    /// Returns whether the role can view the module.
    #[must_use]
    pub fn can_view(&self) -> bool {
        self.can_view
    }

    /// Returns whether the role can edit in the module.
    #[must_use]
    pub fn can_edit(&self) -> bool {
        self.can_edit
    }

    /// Returns whether the role can delete in the module.
    #[must_use]
    pub fn can_delete(&self) -> bool {
        self.can_delete
    }

    /// Returns the flag matching an action.
    #[must_use]
    pub fn allows(&self, action: PermissionAction) -> bool {
        match action {
            PermissionAction::View => self.can_view,
            PermissionAction::Edit => self.can_edit,
            PermissionAction::Delete => self.can_delete,
        }
    }

    /// Returns a copy of the rule with one flag replaced.
    #[must_use]
    pub fn with_flag(mut self, action: PermissionAction, value: bool) -> Self {
        match action {
            PermissionAction::View => self.can_view = value,
            PermissionAction::Edit => self.can_edit = value,
            PermissionAction::Delete => self.can_delete = value,
        }
        self
    }
}

/// In-memory view of the persisted permission rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionMatrix {
    rules: BTreeMap<(RoleLevel, ModuleKey), PermissionRule>,
}

impl PermissionMatrix {
    /// Builds a matrix from stored rules; later duplicates replace earlier ones.
    #[must_use]
    pub fn from_rules(rules: impl IntoIterator<Item = PermissionRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| ((rule.role_level(), rule.module()), rule))
            .collect();

        Self { rules }
    }

    /// Returns the stored rule for a role and module.
    #[must_use]
    pub fn rule(&self, role_level: RoleLevel, module: ModuleKey) -> Option<&PermissionRule> {
        self.rules.get(&(role_level, module))
    }

    /// Returns whether a role may perform an action in a module, before scope
    /// narrowing. SUPER_ADMIN always passes; a missing rule denies.
    #[must_use]
    pub fn allows(&self, role_level: RoleLevel, module: ModuleKey, action: PermissionAction) -> bool {
        if role_level == RoleLevel::SuperAdmin {
            return true;
        }

        self.rule(role_level, module)
            .map(|rule| rule.allows(action))
            .unwrap_or(false)
    }

    /// Inserts or replaces a rule.
    pub fn upsert(&mut self, rule: PermissionRule) {
        self.rules.insert((rule.role_level(), rule.module()), rule);
    }

    /// Drops the stored rule for a role and module.
    pub fn remove(&mut self, role_level: RoleLevel, module: ModuleKey) {
        self.rules.remove(&(role_level, module));
    }

    /// Returns the full grid of configurable roles by modules. Cells without a
    /// stored rule are reported as all-false.
    #[must_use]
    pub fn grid(&self) -> Vec<PermissionRule> {
        RoleLevel::configurable()
            .iter()
            .flat_map(|role_level| {
                ModuleKey::all().iter().map(|module| {
                    self.rule(*role_level, *module)
                        .copied()
                        .unwrap_or_else(|| PermissionRule::denied(*role_level, *module))
                })
            })
            .collect()
    }

    /// Returns the cell for a role and module, all-false when not stored.
    #[must_use]
    pub fn cell(&self, role_level: RoleLevel, module: ModuleKey) -> PermissionRule {
        self.rule(role_level, module)
            .copied()
            .unwrap_or_else(|| PermissionRule::denied(role_level, module))
    }
}
