use hrdesk_core::{AppResult, UserIdentity};
use hrdesk_domain::{EffectiveRole, Employee, NavNode, PROFILE_MENU, visible_navigation};

use crate::AuthorizationService;

/// Static link of the profile dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileMenuEntry {
    /// Stable entry id.
    pub id: String,
    /// Menu label.
    pub label: String,
    /// Target route.
    pub route: String,
}

/// Profile dropdown content for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileMenu {
    /// Caller employee record.
    pub employee: Employee,
    /// Caller effective role.
    pub role: EffectiveRole,
    /// Static menu entries.
    pub entries: Vec<ProfileMenuEntry>,
}

/// Builds the per-caller navigation tree and profile menu.
#[derive(Clone)]
pub struct NavigationService {
    authorization_service: AuthorizationService,
}

impl NavigationService {
    /// Creates a navigation service.
    #[must_use]
    pub fn new(authorization_service: AuthorizationService) -> Self {
        Self {
            authorization_service,
        }
    }

    /// Returns the navigation sections whose module the caller can view.
    pub async fn navigation(&self, identity: &UserIdentity) -> AppResult<Vec<NavNode>> {
        let actor = self.authorization_service.resolve_actor(identity).await?;
        let modules = self.authorization_service.viewable_modules(&actor).await?;
        Ok(visible_navigation(|module| modules.contains(&module)))
    }

    /// Returns the caller's profile and the static dropdown entries.
    pub async fn profile(&self, identity: &UserIdentity) -> AppResult<ProfileMenu> {
        let actor = self.authorization_service.resolve_actor(identity).await?;

        Ok(ProfileMenu {
            employee: actor.employee,
            role: actor.role,
            entries: PROFILE_MENU
                .iter()
                .map(|(id, label, route)| ProfileMenuEntry {
                    id: (*id).to_owned(),
                    label: (*label).to_owned(),
                    route: (*route).to_owned(),
                })
                .collect(),
        })
    }
}
