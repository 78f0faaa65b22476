use hrdesk_application::{
    GradingService, NavigationService, OrganizationSettingsService, TaskService,
};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub task_service: TaskService,
    pub settings_service: OrganizationSettingsService,
    pub grading_service: GradingService,
    pub navigation_service: NavigationService,
    /// Probed by the health endpoint; absent when running on in-memory adapters.
    pub postgres_pool: Option<PgPool>,
    pub frontend_url: String,
    pub identity_header: String,
}
