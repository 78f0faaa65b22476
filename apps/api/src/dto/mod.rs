mod common;
mod grading;
mod navigation;
mod settings;
mod tasks;

pub use common::{
    BadgeEntryResponse, EffectiveRoleResponse, EmployeeResponse, HealthDependencyStatus,
    HealthResponse, LabelEntryResponse, VocabularyResponse,
};
pub use grading::{GradeListQuery, GradeResponse, GradingCandidateResponse, SaveGradeRequest};
pub use navigation::{NavNodeResponse, ProfileMenuEntryResponse, ProfileMenuResponse};
pub use settings::{
    PermissionRuleResponse, RoleAssignmentResponse, RoleOverrideResponse,
    SetRoleOverrideRequest, TogglePermissionRequest,
};
pub use tasks::{
    AttachmentUploadQuery, BoardColumnResponse, CreateTaskRequest, MoveTaskRequest,
    ReplaceAssignmentsRequest, TaskAssignmentDto, TaskAttachmentResponse, TaskCardResponse,
    TaskListQuery, TaskProgressRequest, TaskResponse, UpdateTaskRequest, assignment_inputs,
};

#[cfg(test)]
mod tests {
    use super::{
        BadgeEntryResponse, BoardColumnResponse, CreateTaskRequest, EffectiveRoleResponse,
        EmployeeResponse, GradeResponse, GradingCandidateResponse, HealthDependencyStatus,
        HealthResponse, LabelEntryResponse, MoveTaskRequest, NavNodeResponse,
        PermissionRuleResponse, ProfileMenuEntryResponse, ProfileMenuResponse,
        ReplaceAssignmentsRequest, RoleAssignmentResponse, RoleOverrideResponse,
        SaveGradeRequest, SetRoleOverrideRequest, TaskAssignmentDto, TaskAttachmentResponse,
        TaskCardResponse, TaskProgressRequest, TaskResponse, TogglePermissionRequest,
        UpdateTaskRequest, VocabularyResponse,
    };

    use crate::error::ErrorResponse;
    use ts_rs::Config;
    use ts_rs::TS;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        ErrorResponse::export(&config)?;
        HealthResponse::export(&config)?;
        HealthDependencyStatus::export(&config)?;
        BadgeEntryResponse::export(&config)?;
        LabelEntryResponse::export(&config)?;
        VocabularyResponse::export(&config)?;
        EmployeeResponse::export(&config)?;
        EffectiveRoleResponse::export(&config)?;
        NavNodeResponse::export(&config)?;
        ProfileMenuEntryResponse::export(&config)?;
        ProfileMenuResponse::export(&config)?;
        TaskResponse::export(&config)?;
        TaskAssignmentDto::export(&config)?;
        TaskCardResponse::export(&config)?;
        BoardColumnResponse::export(&config)?;
        TaskAttachmentResponse::export(&config)?;
        CreateTaskRequest::export(&config)?;
        UpdateTaskRequest::export(&config)?;
        ReplaceAssignmentsRequest::export(&config)?;
        MoveTaskRequest::export(&config)?;
        TaskProgressRequest::export(&config)?;
        RoleOverrideResponse::export(&config)?;
        RoleAssignmentResponse::export(&config)?;
        SetRoleOverrideRequest::export(&config)?;
        PermissionRuleResponse::export(&config)?;
        TogglePermissionRequest::export(&config)?;
        GradingCandidateResponse::export(&config)?;
        GradeResponse::export(&config)?;
        SaveGradeRequest::export(&config)?;

        Ok(())
    }
}
