use crate::ModuleKey;

/// Static navigation section definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavSection {
    /// Stable section id.
    pub id: &'static str,
    /// Menu label.
    pub label: &'static str,
    /// Icon name understood by the front end.
    pub icon: &'static str,
    /// Module gating the section; `None` means always visible.
    pub module: Option<ModuleKey>,
    /// Route opened by the section; groups may have none.
    pub route: Option<&'static str>,
    /// Child sections.
    pub children: &'static [NavSection],
}

const fn leaf(
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    module: ModuleKey,
    route: &'static str,
) -> NavSection {
    NavSection {
        id,
        label,
        icon,
        module: Some(module),
        route: Some(route),
        children: &[],
    }
}

/// Main navigation bar configuration.
pub const NAVIGATION: &[NavSection] = &[
    NavSection {
        id: "dashboard",
        label: "Tổng quan",
        icon: "home",
        module: None,
        route: Some("/"),
        children: &[],
    },
    NavSection {
        id: "work",
        label: "Công việc",
        icon: "clipboard",
        module: None,
        route: None,
        children: &[
            leaf("tasks-board", "Bảng Kanban", "columns", ModuleKey::Tasks, "/tasks/board"),
            leaf("tasks-list", "Danh sách công việc", "list", ModuleKey::Tasks, "/tasks"),
            leaf("calendar", "Lịch", "calendar", ModuleKey::Calendar, "/calendar"),
        ],
    },
    NavSection {
        id: "people",
        label: "Nhân sự",
        icon: "users",
        module: None,
        route: None,
        children: &[
            leaf("employees", "Danh bạ nhân viên", "id-card", ModuleKey::Employees, "/employees"),
            leaf("grading", "Đánh giá", "star", ModuleKey::Grading, "/grading"),
        ],
    },
    leaf("reports", "Báo cáo", "chart", ModuleKey::Reports, "/reports"),
    NavSection {
        id: "settings",
        label: "Cài đặt",
        icon: "settings",
        module: Some(ModuleKey::Settings),
        route: None,
        children: &[
            leaf(
                "role-assignments",
                "Phân quyền vai trò",
                "shield",
                ModuleKey::Settings,
                "/settings/roles",
            ),
            leaf(
                "permission-matrix",
                "Ma trận quyền",
                "grid",
                ModuleKey::Settings,
                "/settings/permissions",
            ),
        ],
    },
];

/// Static entries of the profile dropdown.
pub const PROFILE_MENU: &[(&str, &str, &str)] = &[
    ("profile", "Hồ sơ cá nhân", "/profile"),
    ("my-tasks", "Công việc của tôi", "/tasks?assignee=me"),
    ("logout", "Đăng xuất", "/logout"),
];

/// Navigation node visible to one caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavNode {
    /// Stable section id.
    pub id: String,
    /// Menu label.
    pub label: String,
    /// Icon name.
    pub icon: String,
    /// Route, if the node is clickable.
    pub route: Option<String>,
    /// Visible children.
    pub children: Vec<NavNode>,
}

/// Filters the navigation tree with a module visibility predicate.
///
/// Sections gated by a hidden module are dropped with their children; groups
/// without a route are dropped when none of their children remain.
#[must_use]
pub fn visible_navigation(can_view: impl Fn(ModuleKey) -> bool) -> Vec<NavNode> {
    filter_sections(NAVIGATION, &can_view)
}

fn filter_sections(sections: &[NavSection], can_view: &impl Fn(ModuleKey) -> bool) -> Vec<NavNode> {
    sections
        .iter()
        .filter(|section| section.module.is_none_or(can_view))
        .filter_map(|section| {
            let children = filter_sections(section.children, can_view);
            if section.route.is_none() && children.is_empty() {
                return None;
            }

            Some(NavNode {
                id: section.id.to_owned(),
                label: section.label.to_owned(),
                icon: section.icon.to_owned(),
                route: section.route.map(str::to_owned),
                children,
            })
        })
        .collect()
}
