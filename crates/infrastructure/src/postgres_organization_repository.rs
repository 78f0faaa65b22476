use std::str::FromStr;

use async_trait::async_trait;
use hrdesk_application::{EmployeeRepository, PermissionRuleRepository, RoleOverrideRepository};
use hrdesk_core::AppResult;
use hrdesk_domain::{Employee, ModuleKey, PermissionRule, RoleLevel, RoleOverride};
use sqlx::{FromRow, PgPool};

use crate::backend_error::sqlx_error;


/// PostgreSQL-backed employee directory, role overrides, and permission rules.
#[derive(Clone)]
pub struct PostgresOrganizationRepository {
    pool: PgPool,
}

impl PostgresOrganizationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EmployeeRow {
    employee_code: String,
    full_name: String,
    department: Option<String>,
    team: Option<String>,
    job_title: Option<String>,
    email: Option<String>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = hrdesk_core::AppError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        Employee::new(
            row.employee_code,
            row.full_name,
            row.department,
            row.team,
            row.job_title,
            row.email,
        )
    }
}

#[derive(Debug, FromRow)]
struct RoleOverrideRow {
    employee_code: String,
    role_level: String,
    dept_scope: Option<String>,
    team_scope: Option<String>,
}

impl TryFrom<RoleOverrideRow> for RoleOverride {
    type Error = hrdesk_core::AppError;

    fn try_from(row: RoleOverrideRow) -> Result<Self, Self::Error> {
        RoleOverride::new(
            row.employee_code,
            RoleLevel::from_transport(row.role_level.as_str())?,
            row.dept_scope,
            row.team_scope,
        )
    }
}

#[derive(Debug, FromRow)]
struct PermissionRuleRow {
    role_level: String,
    module_key: String,
    can_view: bool,
    can_edit: bool,
    can_delete: bool,
}

impl TryFrom<PermissionRuleRow> for PermissionRule {
    type Error = hrdesk_core::AppError;

    fn try_from(row: PermissionRuleRow) -> Result<Self, Self::Error> {
        PermissionRule::new(
            RoleLevel::from_transport(row.role_level.as_str())?,
            ModuleKey::from_str(row.module_key.as_str())?,
            row.can_view,
            row.can_edit,
            row.can_delete,
        )
    }
}

#[async_trait]
impl EmployeeRepository for PostgresOrganizationRepository {
    async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT employee_code, full_name, department, team, job_title, email
            FROM employees
            ORDER BY employee_code
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| sqlx_error("list employees", error))?;

        rows.into_iter().map(Employee::try_from).collect()
    }

    async fn find_employee(&self, employee_code: &str) -> AppResult<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT employee_code, full_name, department, team, job_title, email
            FROM employees
            WHERE employee_code = $1
            "#,
        )
        .bind(employee_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| sqlx_error("find employee", error))?;

        row.map(Employee::try_from).transpose()
    }
}

#[async_trait]
impl RoleOverrideRepository for PostgresOrganizationRepository {
    async fn list_overrides(&self) -> AppResult<Vec<RoleOverride>> {
        let rows = sqlx::query_as::<_, RoleOverrideRow>(
            r#"
            SELECT employee_code, role_level, dept_scope, team_scope
            FROM role_assignments
            ORDER BY employee_code
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| sqlx_error("list role assignments", error))?;

        rows.into_iter().map(RoleOverride::try_from).collect()
    }

    async fn find_override(&self, employee_code: &str) -> AppResult<Option<RoleOverride>> {
        let row = sqlx::query_as::<_, RoleOverrideRow>(
            r#"
            SELECT employee_code, role_level, dept_scope, team_scope
            FROM role_assignments
            WHERE employee_code = $1
            "#,
        )
        .bind(employee_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| sqlx_error("find role assignment", error))?;

        row.map(RoleOverride::try_from).transpose()
    }

    async fn save_override(&self, role_override: RoleOverride) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO role_assignments (employee_code, role_level, dept_scope, team_scope)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (employee_code) DO UPDATE
            SET role_level = EXCLUDED.role_level,
                dept_scope = EXCLUDED.dept_scope,
                team_scope = EXCLUDED.team_scope,
                updated_at = now()
            "#,
        )
        .bind(role_override.employee_code().as_str())
        .bind(role_override.role_level().as_str())
        .bind(role_override.dept_scope())
        .bind(role_override.team_scope())
        .execute(&self.pool)
        .await
        .map_err(|error| sqlx_error("save role assignment", error))?;

        Ok(())
    }

    async fn delete_override(&self, employee_code: &str) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM role_assignments
            WHERE employee_code = $1
            "#,
        )
        .bind(employee_code)
        .execute(&self.pool)
        .await
        .map_err(|error| sqlx_error("delete role assignment", error))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PermissionRuleRepository for PostgresOrganizationRepository {
    async fn list_rules(&self) -> AppResult<Vec<PermissionRule>> {
        let rows = sqlx::query_as::<_, PermissionRuleRow>(
            r#"
            SELECT role_level, module_key, can_view, can_edit, can_delete
            FROM permission_rules
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| sqlx_error("list permission rules", error))?;

        rows.into_iter().map(PermissionRule::try_from).collect()
    }

    async fn save_rule(&self, rule: PermissionRule) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO permission_rules (role_level, module_key, can_view, can_edit, can_delete)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (role_level, module_key) DO UPDATE
            SET can_view = EXCLUDED.can_view,
                can_edit = EXCLUDED.can_edit,
                can_delete = EXCLUDED.can_delete
            "#,
        )
        .bind(rule.role_level().as_str())
        .bind(rule.module().as_str())
        .bind(rule.can_view())
        .bind(rule.can_edit())
        .bind(rule.can_delete())
        .execute(&self.pool)
        .await
        .map_err(|error| sqlx_error("save permission rule", error))?;

        Ok(())
    }
}
