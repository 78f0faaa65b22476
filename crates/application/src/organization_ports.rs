use async_trait::async_trait;
use hrdesk_core::AppResult;
use hrdesk_domain::{Employee, PermissionRule, RoleOverride};

/// Read-only access to the imported employee directory.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Lists every employee.
    async fn list_employees(&self) -> AppResult<Vec<Employee>>;

    /// Finds one employee by code.
    async fn find_employee(&self, employee_code: &str) -> AppResult<Option<Employee>>;
}

/// Repository port for explicit role assignment records.
#[async_trait]
pub trait RoleOverrideRepository: Send + Sync {
    /// Lists every override.
    async fn list_overrides(&self) -> AppResult<Vec<RoleOverride>>;

    /// Finds the override of one employee.
    async fn find_override(&self, employee_code: &str) -> AppResult<Option<RoleOverride>>;

    /// Inserts or replaces the override of one employee.
    async fn save_override(&self, role_override: RoleOverride) -> AppResult<()>;

    /// Removes the override of one employee, returning whether one existed.
    async fn delete_override(&self, employee_code: &str) -> AppResult<bool>;
}

/// Repository port for the permission matrix table.
#[async_trait]
pub trait PermissionRuleRepository: Send + Sync {
    /// Lists every stored rule.
    async fn list_rules(&self) -> AppResult<Vec<PermissionRule>>;

    /// Inserts or replaces the rule of one (role level, module) cell.
    async fn save_rule(&self, rule: PermissionRule) -> AppResult<()>;
}
