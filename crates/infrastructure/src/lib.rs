//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod backend_error;
mod http_object_storage;
mod in_memory_repository;
mod postgres_grade_repository;
mod postgres_organization_repository;
mod postgres_task_repository;

pub use backend_error::classify_backend_error;
pub use http_object_storage::HttpObjectStorage;
pub use in_memory_repository::InMemoryRepository;
pub use postgres_grade_repository::PostgresGradeRepository;
pub use postgres_organization_repository::PostgresOrganizationRepository;
pub use postgres_task_repository::PostgresTaskRepository;
