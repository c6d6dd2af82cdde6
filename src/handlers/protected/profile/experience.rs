use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::{Experience, Profile};
use crate::error::ApiResult;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::validation::{rule, validate, Check, Rule};

use super::utils::{date_field, load_own_profile, optional_date_field, parse_body, present};

const EXPERIENCE_RULES: &[Rule] = &[
    rule("title", Check::NotEmpty, "Title is required"),
    rule("company", Check::NotEmpty, "Company is required"),
    rule("from", Check::NotEmpty, "From date is required"),
    rule("from", Check::Date, "From date is not a valid date"),
    rule("to", Check::Date, "To date is not a valid date"),
    rule("from", Check::Before("to"), "From date must be before to date"),
];

#[derive(Debug, Deserialize)]
pub struct ExperienceRequest {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: String,
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

impl ExperienceRequest {
    fn into_entry(self) -> ApiResult<Experience> {
        Ok(Experience {
            id: Uuid::new_v4(),
            from: date_field("from", &self.from)?,
            to: optional_date_field("to", self.to.as_deref())?,
            title: self.title,
            company: self.company,
            location: present(self.location),
            current: self.current,
            description: present(self.description),
        })
    }
}

/// PUT /api/profile/experience - prepend an experience entry
pub async fn put(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Profile>> {
    let Json(body) = payload?;
    validate(&body, EXPERIENCE_RULES)?;
    let entry = parse_body::<ExperienceRequest>(body)?.into_entry()?;

    let mut profile = load_own_profile(&state, user.id).await?;
    tracing::debug!("Adding experience {} to profile {}", entry.id, profile.id);
    profile.add_experience(entry);
    state.store.save(&profile).await?;

    Ok(Json(profile))
}

/// DELETE /api/profile/experience/:exp_id - remove one experience entry by id
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(exp_id): Path<String>,
) -> ApiResult<Json<Profile>> {
    let mut profile = load_own_profile(&state, user.id).await?;

    let removed = Uuid::parse_str(&exp_id)
        .map(|id| profile.remove_experience(id))
        .unwrap_or(false);

    if removed {
        state.store.save(&profile).await?;
    } else {
        tracing::debug!("No experience {} on profile {}", exp_id, profile.id);
    }

    Ok(Json(profile))
}
