use std::collections::HashMap;

use hrdesk_core::{AppError, AppResult, UserIdentity};
use hrdesk_domain::{AccessContext, EffectiveRole, Employee};

use super::{Actor, AuthorizationService};

impl AuthorizationService {
    /// Resolves the caller identity into an employee with an effective role.
    pub async fn resolve_actor(&self, identity: &UserIdentity) -> AppResult<Actor> {
        let employee = self
            .employees
            .find_employee(identity.employee_code())
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized(format!(
                    "employee '{}' is not registered in the directory",
                    identity.employee_code()
                ))
            })?;

        let role = self.effective_role(&employee).await?;
        let context = AccessContext::from_effective_role(&employee, &role);

        Ok(Actor {
            employee,
            role,
            context,
        })
    }

    /// Resolves the effective role of any employee: an override record wins
    /// over the role inferred from the job title.
    pub async fn effective_role(&self, employee: &Employee) -> AppResult<EffectiveRole> {
        let role_override = self
            .overrides
            .find_override(employee.employee_code().as_str())
            .await?;

        Ok(EffectiveRole::resolve(employee, role_override.as_ref()))
    }

    /// Finds an employee or fails with `NotFound`.
    pub async fn require_employee(&self, employee_code: &str) -> AppResult<Employee> {
        self.employees
            .find_employee(employee_code)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("employee '{employee_code}' does not exist")))
    }

    /// Lists every employee with their effective role, loading overrides once.
    pub async fn employees_with_roles(&self) -> AppResult<Vec<(Employee, EffectiveRole)>> {
        let overrides: HashMap<String, _> = self
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

        Ok(self
            .employees
            .list_employees()
            .await?
            .into_iter()
            .map(|employee| {
                let role = EffectiveRole::resolve(
                    &employee,
                    overrides.get(employee.employee_code().as_str()),
                );
                (employee, role)
            })
            .collect())
    }
}
