use std::fmt::{Display, Formatter};
use std::str::FromStr;

use hrdesk_core::AppError;
use serde::{Deserialize, Serialize};

/// Organizational authority level, ordered from most to least authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleLevel {
    /// Unrestricted administrator. Only reachable through an explicit override.
    SuperAdmin,
    /// Board member or director.
    BoardDirector,
    /// Head or deputy head of a department.
    DeptHead,
    /// Leader of a team inside a department.
    TeamLeader,
    /// Regular employee.
    Staff,
}

impl RoleLevel {
    /// Returns a stable storage value for this role level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::BoardDirector => "BOARD_DIRECTOR",
            Self::DeptHead => "DEPT_HEAD",
            Self::TeamLeader => "TEAM_LEADER",
            Self::Staff => "STAFF",
        }
    }

    /// Returns the label shown in settings and profile menus.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "Quản trị hệ thống",
            Self::BoardDirector => "Ban giám đốc",
            Self::DeptHead => "Trưởng phòng",
            Self::TeamLeader => "Trưởng nhóm",
            Self::Staff => "Nhân viên",
        }
    }

    /// Returns the authority rank; zero is the highest.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            Self::SuperAdmin => 0,
            Self::BoardDirector => 1,
            Self::DeptHead => 2,
            Self::TeamLeader => 3,
            Self::Staff => 4,
        }
    }

    /// Returns all role levels in descending authority order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[RoleLevel] = &[
            RoleLevel::SuperAdmin,
            RoleLevel::BoardDirector,
            RoleLevel::DeptHead,
            RoleLevel::TeamLeader,
            RoleLevel::Staff,
        ];

        ALL
    }

    /// Returns the role levels whose rights come from the permission matrix.
    #[must_use]
    pub fn configurable() -> &'static [Self] {
        &Self::all()[1..]
    }

    /// Parses a transport value into a role level.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for RoleLevel {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "SUPER_ADMIN" => Ok(Self::SuperAdmin),
            "BOARD_DIRECTOR" => Ok(Self::BoardDirector),
            "DEPT_HEAD" => Ok(Self::DeptHead),
            "TEAM_LEADER" => Ok(Self::TeamLeader),
            "STAFF" => Ok(Self::Staff),
            _ => Err(AppError::Validation(format!(
                "unknown role level '{value}'"
            ))),
        }
    }
}

impl Display for RoleLevel {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}
