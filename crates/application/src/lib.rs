//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_service;
mod grading_ports;
mod grading_service;
mod navigation_service;
mod organization_ports;
mod permission_matrix_editor;
mod settings_service;
mod task_ports;
mod task_service;

#[cfg(test)]
mod test_support;

pub use authorization_service::{Actor, AuthorizationService};
pub use grading_ports::GradeRepository;
pub use grading_service::{GradingCandidate, GradingService, SaveGradeInput};
pub use navigation_service::{NavigationService, ProfileMenu, ProfileMenuEntry};
pub use organization_ports::{EmployeeRepository, PermissionRuleRepository, RoleOverrideRepository};
pub use permission_matrix_editor::PermissionMatrixEditor;
pub use settings_service::{OrganizationSettingsService, RoleAssignmentEntry, SetRoleOverrideInput};
pub use task_ports::{AttachmentRepository, ObjectStorage, TaskRepository};
pub use task_service::{AssignmentInput, AttachmentUpload, CreateTaskInput, TaskService};
