use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::Profile;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::validation::{parse_date, FieldError};

pub const NO_PROFILE: &str = "There is no profile for this user";

/// Load the caller's profile or fail with NotFound
pub async fn load_own_profile(state: &AppState, user_id: Uuid) -> ApiResult<Profile> {
    state
        .store
        .find_by_user(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(NO_PROFILE))
}

/// Deserialize a body that already passed its rule table
pub fn parse_body<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    serde_json::from_value(body).map_err(|e| ApiError::invalid_json(e.to_string()))
}

/// Treat empty strings the same as absent fields
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Convert an already-validated date string; a parse failure is still reported per field
pub fn date_field(param: &str, value: &str) -> ApiResult<DateTime<Utc>> {
    parse_date(value).ok_or_else(|| {
        ApiError::validation_error(vec![FieldError {
            param: param.to_string(),
            msg: format!("Invalid date: {}", value),
            value: Some(Value::String(value.to_string())),
        }])
    })
}

pub fn optional_date_field(param: &str, value: Option<&str>) -> ApiResult<Option<DateTime<Utc>>> {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => date_field(param, v).map(Some),
        None => Ok(None),
    }
}
