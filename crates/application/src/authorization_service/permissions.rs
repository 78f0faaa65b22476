use std::collections::BTreeSet;

use hrdesk_core::{AppError, AppResult, UserIdentity};
use hrdesk_domain::{
    ModuleKey, PermissionAction, PermissionMatrix, TargetContext, can_perform_action,
};

use super::{Actor, AuthorizationService};

impl AuthorizationService {
    /// Returns whether the caller may perform the action on the target.
    pub async fn can_perform_action(
        &self,
        actor: &Actor,
        action: PermissionAction,
        target: Option<&TargetContext>,
    ) -> AppResult<bool> {
        if actor.context.is_super_admin() {
            return Ok(true);
        }

        let matrix = self.load_matrix().await?;
        Ok(can_perform_action(&actor.context, action, target, &matrix))
    }

    /// Ensures the caller may perform the action on the target.
    pub async fn require_action(
        &self,
        actor: &Actor,
        action: PermissionAction,
        target: &TargetContext,
    ) -> AppResult<()> {
        if self.can_perform_action(actor, action, Some(target)).await? {
            return Ok(());
        }

        Err(forbidden(actor, action, target))
    }

    /// Resolves the caller and ensures the action is allowed in one call.
    pub async fn authorize(
        &self,
        identity: &UserIdentity,
        action: PermissionAction,
        target: &TargetContext,
    ) -> AppResult<Actor> {
        let actor = self.resolve_actor(identity).await?;
        self.require_action(&actor, action, target).await?;
        Ok(actor)
    }

    /// Returns the modules whose capability flag for `View` is set for the
    /// caller's role. Organization-wide modules also need the module-wide
    /// check to pass, which scoped roles never do.
    pub async fn viewable_modules(&self, actor: &Actor) -> AppResult<BTreeSet<ModuleKey>> {
        let matrix = self.load_matrix().await?;
        Ok(viewable_modules(actor, &matrix))
    }
}

pub(crate) fn viewable_modules(actor: &Actor, matrix: &PermissionMatrix) -> BTreeSet<ModuleKey> {
    ModuleKey::all()
        .iter()
        .copied()
        .filter(|module| {
            if module.is_organization_wide() {
                can_perform_action(
                    &actor.context,
                    PermissionAction::View,
                    Some(&TargetContext::module(*module)),
                    matrix,
                )
            } else {
                matrix.allows(actor.context.role_level, *module, PermissionAction::View)
            }
        })
        .collect()
}

fn forbidden(actor: &Actor, action: PermissionAction, target: &TargetContext) -> AppError {
    AppError::Forbidden(format!(
        "employee '{}' with role '{}' is missing '{}' access to module '{}'",
        actor.employee_code(),
        actor.context.role_level.as_str(),
        action.as_str(),
        target.module.as_str()
    ))
}
