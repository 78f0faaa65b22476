use axum::Json;
use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use hrdesk_core::UserIdentity;

use crate::dto::{GradeListQuery, GradeResponse, GradingCandidateResponse, SaveGradeRequest};
use crate::error::ApiResult;
use crate::state::AppState;


pub async fn grading_targets_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<GradingCandidateResponse>>> {
    let candidates = state
        .grading_service
        .grading_targets(&user)
        .await?
        .into_iter()
        .map(GradingCandidateResponse::from)
        .collect();

    Ok(Json(candidates))
}

pub async fn list_grades_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<GradeListQuery>,
) -> ApiResult<Json<Vec<GradeResponse>>> {
    let period = query
        .period
        .as_deref()
        .map(str::trim)
        .filter(|period| !period.is_empty());
    let grades = state
        .grading_service
        .list_given_grades(&user, period)
        .await?
        .into_iter()
        .map(GradeResponse::from)
        .collect();

    Ok(Json(grades))
}

pub async fn save_grade_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<SaveGradeRequest>,
) -> ApiResult<(StatusCode, Json<GradeResponse>)> {
    let grade = state
        .grading_service
        .save_grade(&user, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(GradeResponse::from(grade))))
}
