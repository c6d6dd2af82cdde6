use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::database::models::Profile;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const PROFILE_NOT_FOUND: &str = "Profile not found";

/// GET /api/profile - every profile, populated with owner name and avatar
pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Profile>>> {
    let profiles = state.store.find_all_populated().await?;
    Ok(Json(profiles))
}

/// GET /api/profile/user/:user_id - one profile by owning user
///
/// A malformed id is indistinguishable from an unknown one.
pub async fn by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Profile>> {
    let user_id = Uuid::parse_str(&user_id).map_err(|_| ApiError::not_found(PROFILE_NOT_FOUND))?;

    let profile = state
        .store
        .find_by_user_populated(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(PROFILE_NOT_FOUND))?;

    Ok(Json(profile))
}
