use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// DELETE /api/profile - remove the caller's profile and user record
///
/// Posts written by the user are left in place.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Value>> {
    let profile_removed = state.store.delete_by_user(user.id).await?;
    let user_removed = state.store.delete_user(user.id).await?;

    tracing::info!(
        "Deleted account {} (profile removed: {}, user removed: {})",
        user.id,
        profile_removed,
        user_removed
    );

    Ok(Json(json!({ "msg": "User deleted" })))
}
