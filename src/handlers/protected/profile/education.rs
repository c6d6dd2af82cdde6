use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::{Education, Profile};
use crate::error::ApiResult;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::validation::{rule, validate, Check, Rule};

use super::utils::{date_field, load_own_profile, optional_date_field, parse_body, present};

const EDUCATION_RULES: &[Rule] = &[
    rule("school", Check::NotEmpty, "School is required"),
    rule("degree", Check::NotEmpty, "Degree is required"),
    rule("fieldofstudy", Check::NotEmpty, "Field of study is required"),
    rule("from", Check::NotEmpty, "From date is required"),
    rule("from", Check::Date, "From date is not a valid date"),
    rule("to", Check::Date, "To date is not a valid date"),
    rule("from", Check::Before("to"), "From date must be before to date"),
];

#[derive(Debug, Deserialize)]
pub struct EducationRequest {
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: String,
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

impl EducationRequest {
    fn into_entry(self) -> ApiResult<Education> {
        Ok(Education {
            id: Uuid::new_v4(),
            from: date_field("from", &self.from)?,
            to: optional_date_field("to", self.to.as_deref())?,
            school: self.school,
            degree: self.degree,
            fieldofstudy: self.fieldofstudy,
            current: self.current,
            description: present(self.description),
        })
    }
}

/// PUT /api/profile/education - prepend an education entry
pub async fn put(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Profile>> {
    let Json(body) = payload?;
    validate(&body, EDUCATION_RULES)?;
    let entry = parse_body::<EducationRequest>(body)?.into_entry()?;

    let mut profile = load_own_profile(&state, user.id).await?;
    profile.add_education(entry);
    state.store.save(&profile).await?;

    Ok(Json(profile))
}

/// DELETE /api/profile/education/:edu_id - remove one education entry by id
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(edu_id): Path<String>,
) -> ApiResult<Json<Profile>> {
    let mut profile = load_own_profile(&state, user.id).await?;

    let removed = Uuid::parse_str(&edu_id)
        .map(|id| profile.remove_education(id))
        .unwrap_or(false);

    if removed {
        state.store.save(&profile).await?;
    }

    Ok(Json(profile))
}
