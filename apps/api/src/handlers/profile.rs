use axum::Json;
use axum::extract::{Extension, State};
use hrdesk_core::UserIdentity;

use crate::dto::{NavNodeResponse, ProfileMenuResponse, VocabularyResponse};
use crate::error::ApiResult;
use crate::state::AppState;


pub async fn me_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<ProfileMenuResponse>> {
    let profile = state.navigation_service.profile(&user).await?;
    Ok(Json(ProfileMenuResponse::from(profile)))
}

pub async fn navigation_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<NavNodeResponse>>> {
    let nodes = state
        .navigation_service
        .navigation(&user)
        .await?
        .into_iter()
        .map(NavNodeResponse::from)
        .collect();

    Ok(Json(nodes))
}

pub async fn vocabulary_handler() -> Json<VocabularyResponse> {
    Json(VocabularyResponse::build())
}
