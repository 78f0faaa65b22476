use hrdesk_application::{GradingCandidate, SaveGradeInput};
use hrdesk_domain::Grade;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::{EffectiveRoleResponse, EmployeeResponse};

/// Employee the caller may grade.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/grading-candidate-response.ts"
)]
pub struct GradingCandidateResponse {
    pub employee: EmployeeResponse,
    pub role: EffectiveRoleResponse,
}

/// Stored grade.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/grade-response.ts"
)]
pub struct GradeResponse {
    pub grade_id: String,
    pub grader_code: String,
    pub target_code: String,
    /// `YYYY-MM`.
    pub period: String,
    pub score: u8,
    pub comment: Option<String>,
    pub created_at: String,
}

/// Incoming payload for saving a grade.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-grade-request.ts"
)]
pub struct SaveGradeRequest {
    pub target_code: String,
    pub period: String,
    pub score: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GradeListQuery {
    pub period: Option<String>,
}

impl From<GradingCandidate> for GradingCandidateResponse {
    fn from(value: GradingCandidate) -> Self {
        Self {
            employee: EmployeeResponse::from(value.employee),
            role: EffectiveRoleResponse::from(value.role),
        }
    }
}

impl From<Grade> for GradeResponse {
    fn from(value: Grade) -> Self {
        Self {
            grade_id: value.grade_id().to_string(),
            grader_code: value.grader_code().as_str().to_owned(),
            target_code: value.target_code().as_str().to_owned(),
            period: value.period().as_str().to_owned(),
            score: value.score(),
            comment: value.comment().map(str::to_owned),
            created_at: value.created_at().to_rfc3339(),
        }
    }
}

impl From<SaveGradeRequest> for SaveGradeInput {
    fn from(value: SaveGradeRequest) -> Self {
        Self {
            target_code: value.target_code,
            period: value.period,
            score: value.score,
            comment: value.comment,
        }
    }
}
