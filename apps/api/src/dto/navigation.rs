use hrdesk_application::{ProfileMenu, ProfileMenuEntry};
use hrdesk_domain::NavNode;
use serde::Serialize;
use ts_rs::TS;

use super::common::{EffectiveRoleResponse, EmployeeResponse};

/// Navigation node visible to the caller.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/nav-node-response.ts"
)]
pub struct NavNodeResponse {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub route: Option<String>,
    pub children: Vec<NavNodeResponse>,
}

/// One entry of the profile dropdown.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/profile-menu-entry-response.ts"
)]
pub struct ProfileMenuEntryResponse {
    pub id: String,
    pub label: String,
    pub route: String,
}

/// Profile menu of the caller.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/profile-menu-response.ts"
)]
pub struct ProfileMenuResponse {
    pub employee: EmployeeResponse,
    pub role: EffectiveRoleResponse,
    pub entries: Vec<ProfileMenuEntryResponse>,
}

impl From<NavNode> for NavNodeResponse {
    fn from(value: NavNode) -> Self {
        Self {
            id: value.id,
            label: value.label,
            icon: value.icon,
            route: value.route,
            children: value.children.into_iter().map(Self::from).collect(),
        }
    }
}

impl From<ProfileMenuEntry> for ProfileMenuEntryResponse {
    fn from(value: ProfileMenuEntry) -> Self {
        Self {
            id: value.id,
            label: value.label,
            route: value.route,
        }
    }
}

impl From<ProfileMenu> for ProfileMenuResponse {
    fn from(value: ProfileMenu) -> Self {
        Self {
            employee: EmployeeResponse::from(value.employee),
            role: EffectiveRoleResponse::from(value.role),
            entries: value
                .entries
                .into_iter()
                .map(ProfileMenuEntryResponse::from)
                .collect(),
        }
    }
}
