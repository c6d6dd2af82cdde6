use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use crate::database::models::Profile;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

use super::utils::NO_PROFILE;

/// GET /api/profile/me - the caller's profile with owner name and avatar
pub async fn get(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Profile>> {
    let profile = state
        .store
        .find_by_user_populated(user.id)
        .await?
        .ok_or_else(|| ApiError::not_found(NO_PROFILE))?;

    Ok(Json(profile))
}
