use std::sync::Arc;

use hrdesk_application::{
    AuthorizationService, GradingService, NavigationService, OrganizationSettingsService,
    TaskService,
};
use hrdesk_infrastructure::{
    HttpObjectStorage, PostgresGradeRepository, PostgresOrganizationRepository,
    PostgresTaskRepository,
};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub fn build_storage(config: &ApiConfig) -> HttpObjectStorage {
    HttpObjectStorage::new(
        reqwest::Client::new(),
        config.storage_url.clone(),
        config.storage_service_key.clone(),
        config.storage_bucket.clone(),
    )
}

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> AppState {
    let organization = Arc::new(PostgresOrganizationRepository::new(pool.clone()));
    let tasks = Arc::new(PostgresTaskRepository::new(pool.clone()));
    let grades = Arc::new(PostgresGradeRepository::new(pool.clone()));
    let storage = Arc::new(build_storage(config));

    let authorization_service = AuthorizationService::new(
        organization.clone(),
        organization.clone(),
        organization.clone(),
    );

    AppState {
        task_service: TaskService::new(
            authorization_service.clone(),
            tasks.clone(),
            tasks,
            storage,
        ),
        settings_service: OrganizationSettingsService::new(
            authorization_service.clone(),
            organization.clone(),
            organization.clone(),
            organization,
        ),
        grading_service: GradingService::new(authorization_service.clone(), grades),
        navigation_service: NavigationService::new(authorization_service),
        postgres_pool: Some(pool),
        frontend_url: config.frontend_url.clone(),
        identity_header: config.identity_header.clone(),
    }
}
