use std::sync::Arc;

use hrdesk_core::AppResult;
use hrdesk_domain::{AccessContext, EffectiveRole, Employee, PermissionMatrix};

use crate::{EmployeeRepository, PermissionRuleRepository, RoleOverrideRepository};

mod actor;
mod permissions;


/// Caller resolved against the employee directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Employee record of the caller.
    pub employee: Employee,
    /// Effective role and scopes.
    pub role: EffectiveRole,
    /// Context consumed by the access predicates.
    pub context: AccessContext,
}

impl Actor {
    /// Returns the caller employee code.
    #[must_use]
    pub fn employee_code(&self) -> &str {
        self.employee.employee_code().as_str()
    }
}

/// Application service resolving callers and evaluating the permission matrix.
#[derive(Clone)]
pub struct AuthorizationService {
    employees: Arc<dyn EmployeeRepository>,
    overrides: Arc<dyn RoleOverrideRepository>,
    rules: Arc<dyn PermissionRuleRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from repository implementations.
    #[must_use]
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        overrides: Arc<dyn RoleOverrideRepository>,
        rules: Arc<dyn PermissionRuleRepository>,
    ) -> Self {
        Self {
            employees,
            overrides,
            rules,
        }
    }

    /// Loads the persisted permission matrix.
    pub async fn load_matrix(&self) -> AppResult<PermissionMatrix> {
        Ok(PermissionMatrix::from_rules(self.rules.list_rules().await?))
    }
}
