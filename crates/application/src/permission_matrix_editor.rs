use std::sync::Arc;

use hrdesk_core::{AppError, AppResult};
use hrdesk_domain::{ModuleKey, PermissionAction, PermissionMatrix, PermissionRule, RoleLevel};

use crate::PermissionRuleRepository;

/// Editable copy of the permission matrix.
///
/// A toggle is applied to the local grid first and then persisted. When the
/// write fails the cell is restored to its previous value and the backend
/// error is returned, so the grid never shows a state the backend rejected.
pub struct PermissionMatrixEditor {
    matrix: PermissionMatrix,
    rules: Arc<dyn PermissionRuleRepository>,
}

impl PermissionMatrixEditor {
    /// Loads the current matrix from the rule repository.
    pub async fn load(rules: Arc<dyn PermissionRuleRepository>) -> AppResult<Self> {
        let matrix = PermissionMatrix::from_rules(rules.list_rules().await?);
        Ok(Self { matrix, rules })
    }

    /// Returns the local matrix state.
    #[must_use]
    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }

    /// Flips one capability flag and persists the resulting rule.
    pub async fn toggle(
        &mut self,
        role_level: RoleLevel,
        module: ModuleKey,
        action: PermissionAction,
    ) -> AppResult<PermissionRule> {
        let current = self.matrix.cell(role_level, module);
        let value = !current.allows(action);
        self.set(role_level, module, action, value).await
    }

    /// Sets one capability flag and persists the resulting rule.
    pub async fn set(
        &mut self,
        role_level: RoleLevel,
        module: ModuleKey,
        action: PermissionAction,
        value: bool,
    ) -> AppResult<PermissionRule> {
        if role_level == RoleLevel::SuperAdmin {
            return Err(AppError::Validation(
                "SUPER_ADMIN permissions are implicit and cannot be edited".to_owned(),
            ));
        }

        let previous = self.matrix.rule(role_level, module).copied();
        let updated = self.matrix.cell(role_level, module).with_flag(action, value);
        self.matrix.upsert(updated);

        if let Err(error) = self.rules.save_rule(updated).await {
            self.restore(role_level, module, previous);
            return Err(error);
        }

        Ok(updated)
    }

    fn restore(&mut self, role_level: RoleLevel, module: ModuleKey, previous: Option<PermissionRule>) {
        match previous {
            Some(rule) => self.matrix.upsert(rule),
            None => self.matrix.remove(role_level, module),
        }
    }
}
