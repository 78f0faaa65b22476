use std::sync::Arc;

use chrono::Utc;
use hrdesk_core::{AppError, AppResult, UserIdentity};
use hrdesk_domain::{
    EffectiveRole, Employee, Grade, GradePeriod, GradingTarget, ModuleKey, PermissionAction,
    TargetContext, can_grade, can_perform_action,
};
use uuid::Uuid;

use crate::{Actor, AuthorizationService, GradeRepository};

#[cfg(test)]
mod tests;

/// Employee the caller may grade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradingCandidate {
    /// Employee record.
    pub employee: Employee,
    /// Effective role of the employee.
    pub role: EffectiveRole,
}

/// Input payload for saving a grade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveGradeInput {
    /// Employee being graded.
    pub target_code: String,
    /// Period in `YYYY-MM` form.
    pub period: String,
    /// Score between 0 and 100.
    pub score: i32,
    /// Optional comment.
    pub comment: Option<String>,
}

/// Grading use cases over the fixed grader/target hierarchy.
#[derive(Clone)]
pub struct GradingService {
    authorization_service: AuthorizationService,
    grades: Arc<dyn GradeRepository>,
}

impl GradingService {
    /// Creates a grading service.
    #[must_use]
    pub fn new(authorization_service: AuthorizationService, grades: Arc<dyn GradeRepository>) -> Self {
        Self {
            authorization_service,
            grades,
        }
    }

    /// Lists employees the caller may grade, ordered by department and name.
    pub async fn grading_targets(&self, identity: &UserIdentity) -> AppResult<Vec<GradingCandidate>> {
        let actor = self.authorization_service.resolve_actor(identity).await?;
        let matrix = self.authorization_service.load_matrix().await?;

        let mut candidates: Vec<GradingCandidate> = self
            .authorization_service
            .employees_with_roles()
            .await?
            .into_iter()
            .filter(|(employee, role)| {
                employee.employee_code() != actor.employee.employee_code()
                    && can_grade(&actor.context, &GradingTarget::from_employee(employee, role))
                    && can_perform_action(
                        &actor.context,
                        PermissionAction::Edit,
                        Some(&TargetContext::employee(ModuleKey::Grading, employee)),
                        &matrix,
                    )
            })
            .map(|(employee, role)| GradingCandidate { employee, role })
            .collect();

        candidates.sort_by(|left, right| {
            left.employee
                .department()
                .cmp(&right.employee.department())
                .then_with(|| left.employee.full_name().cmp(right.employee.full_name()))
        });

        Ok(candidates)
    }

    /// Saves the caller's grade for a target and period, replacing an earlier
    /// grade for the same pair and period.
    pub async fn save_grade(&self, identity: &UserIdentity, input: SaveGradeInput) -> AppResult<Grade> {
        let actor = self.authorization_service.resolve_actor(identity).await?;
        let period = GradePeriod::parse(&input.period)?;
        let target = self
            .authorization_service
            .require_employee(&input.target_code)
            .await?;

        self.require_can_grade(&actor, &target).await?;
        self.authorization_service
            .require_action(
                &actor,
                PermissionAction::Edit,
                &TargetContext::employee(ModuleKey::Grading, &target),
            )
            .await?;

        let grade = Grade::new(
            Uuid::new_v4(),
            actor.employee_code(),
            target.employee_code().as_str(),
            period,
            input.score,
            input.comment,
            Utc::now(),
        )?;

        self.grades.save_grade(grade).await
    }

    /// Lists grades given by the caller, optionally for one period.
    pub async fn list_given_grades(
        &self,
        identity: &UserIdentity,
        period: Option<&str>,
    ) -> AppResult<Vec<Grade>> {
        let actor = self.authorization_service.resolve_actor(identity).await?;
        let period = period.map(GradePeriod::parse).transpose()?;

        self.grades
            .list_grades_by_grader(actor.employee_code(), period.as_ref())
            .await
    }

    async fn require_can_grade(&self, actor: &Actor, target: &Employee) -> AppResult<()> {
        let role = self.authorization_service.effective_role(target).await?;
        if can_grade(&actor.context, &GradingTarget::from_employee(target, &role)) {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "role '{}' cannot grade employee '{}' with role '{}'",
            actor.context.role_level.as_str(),
            target.employee_code(),
            role.role_level.as_str()
        )))
    }
}
