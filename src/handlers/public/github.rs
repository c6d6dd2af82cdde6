use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GitHub logins are 1-39 alphanumerics or single inner hyphens
fn is_valid_login(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= 39
        && !username.starts_with('-')
        && !username.ends_with('-')
        && !username.contains("--")
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// GET /api/profile/github/:username - latest public repositories
pub async fn repos(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> ApiResult<Json<Value>> {
    if !is_valid_login(&username) {
        return Err(ApiError::not_found("No Github profile found"));
    }

    let repos = state.github.user_repos(&username).await?;
    Ok(Json(repos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_shape() {
        assert!(is_valid_login("octocat"));
        assert!(is_valid_login("some-user42"));
        assert!(!is_valid_login(""));
        assert!(!is_valid_login("-lead"));
        assert!(!is_valid_login("double--dash"));
        assert!(!is_valid_login("../etc"));
        assert!(!is_valid_login(&"a".repeat(40)));
    }
}
