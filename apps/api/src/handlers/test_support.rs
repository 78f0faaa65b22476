use std::sync::Arc;

use hrdesk_application::{
    AuthorizationService, GradingService, NavigationService, OrganizationSettingsService,
    RoleOverrideRepository, TaskService,
};
use hrdesk_core::UserIdentity;
use hrdesk_domain::{Employee, ModuleKey, PermissionRule, RoleLevel, RoleOverride};
use hrdesk_infrastructure::InMemoryRepository;

use crate::state::AppState;

pub(crate) const DIRECTOR: &str = "NV001";
pub(crate) const SALES_HEAD: &str = "NV002";
pub(crate) const SALES_LEADER: &str = "NV003";
pub(crate) const SALES_STAFF: &str = "NV004";
pub(crate) const ADMIN: &str = "NV009";

pub(crate) fn caller(code: &str) -> UserIdentity {
    UserIdentity::new(code, code, None)
}

fn employee(code: &str, name: &str, department: &str, team: Option<&str>, title: &str) -> Employee {
    match Employee::new(
        code,
        name,
        Some(department.to_owned()),
        team.map(str::to_owned),
        Some(title.to_owned()),
        None,
    ) {
        Ok(employee) => employee,
        Err(error) => panic!("invalid fixture employee '{code}': {error}"),
    }
}

fn rule(role_level: RoleLevel, module: ModuleKey, view: bool, edit: bool, delete: bool) -> PermissionRule {
    match PermissionRule::new(role_level, module, view, edit, delete) {
        Ok(rule) => rule,
        Err(error) => panic!("invalid fixture rule: {error}"),
    }
}

/// Application state over one in-memory repository with a small sales
/// department, a director, and an administrator.
pub(crate) async fn seeded_state() -> (AppState, Arc<InMemoryRepository>) {
    let repository = Arc::new(InMemoryRepository::new());
    repository
        .insert_employees([
            employee(DIRECTOR, "Nguyễn Văn An", "Ban giám đốc", None, "Phó Giám Đốc"),
            employee(
                SALES_HEAD,
                "Trần Thị Bình",
                "Kinh doanh",
                Some("Nhóm 1"),
                "Trưởng phòng kinh doanh",
            ),
            employee(SALES_LEADER, "Lê Văn Cường", "Kinh doanh", Some("Nhóm 1"), "Trưởng nhóm"),
            employee(
                SALES_STAFF,
                "Phạm Thị Dung",
                "Kinh doanh",
                Some("Nhóm 1"),
                "Nhân viên kinh doanh",
            ),
            employee(ADMIN, "Hoàng Minh Em", "Công nghệ", None, "Chuyên viên IT"),
        ])
        .await;
    repository
        .insert_rules([
            rule(RoleLevel::BoardDirector, ModuleKey::Tasks, true, true, true),
            rule(RoleLevel::BoardDirector, ModuleKey::Grading, true, true, false),
            rule(RoleLevel::BoardDirector, ModuleKey::Settings, true, false, false),
            rule(RoleLevel::DeptHead, ModuleKey::Tasks, true, true, true),
            rule(RoleLevel::DeptHead, ModuleKey::Grading, true, true, false),
            rule(RoleLevel::TeamLeader, ModuleKey::Tasks, true, true, false),
            rule(RoleLevel::TeamLeader, ModuleKey::Grading, true, true, false),
            rule(RoleLevel::Staff, ModuleKey::Tasks, true, true, false),
        ])
        .await;

    let Ok(admin) = RoleOverride::new(ADMIN, RoleLevel::SuperAdmin, None, None) else {
        panic!("admin override should be valid");
    };
    if let Err(error) = repository.save_override(admin).await {
        panic!("admin override should be stored: {error}");
    }

    let authorization_service = AuthorizationService::new(
        repository.clone(),
        repository.clone(),
        repository.clone(),
    );
    let state = AppState {
        task_service: TaskService::new(
            authorization_service.clone(),
            repository.clone(),
            repository.clone(),
            repository.clone(),
        ),
        settings_service: OrganizationSettingsService::new(
            authorization_service.clone(),
            repository.clone(),
            repository.clone(),
            repository.clone(),
        ),
        grading_service: GradingService::new(authorization_service.clone(), repository.clone()),
        navigation_service: NavigationService::new(authorization_service),
        postgres_pool: None,
        frontend_url: "http://localhost:3000".to_owned(),
        identity_header: "x-employee-code".to_owned(),
    };

    (state, repository)
}
