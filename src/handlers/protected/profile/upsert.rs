use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::database::models::{Profile, ProfileFields, Skills, Social};
use crate::error::ApiResult;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::validation::{rule, validate, Check, Rule};

use super::utils::{parse_body, present};

const PROFILE_RULES: &[Rule] = &[
    rule("status", Check::NotEmpty, "Status is required"),
    rule("skills", Check::NotEmpty, "Skills is required"),
];

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<Skills>,
    pub youtube: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
}

impl ProfileRequest {
    /// Keep only the fields the caller actually supplied
    pub fn into_fields(self) -> ProfileFields {
        ProfileFields {
            company: present(self.company),
            website: present(self.website),
            location: present(self.location),
            bio: present(self.bio),
            status: present(self.status),
            githubusername: present(self.githubusername),
            skills: self.skills.map(Skills::into_vec),
            social: Social {
                youtube: present(self.youtube),
                twitter: present(self.twitter),
                facebook: present(self.facebook),
                linkedin: present(self.linkedin),
                instagram: present(self.instagram),
            },
        }
    }
}

/// POST /api/profile - create the caller's profile, or sparsely update it
///
/// The existence check and the write are separate store calls; two concurrent
/// first posts from one user can race.
pub async fn post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Profile>> {
    let Json(body) = payload?;
    validate(&body, PROFILE_RULES)?;
    let fields = parse_body::<ProfileRequest>(body)?.into_fields();

    if state.store.find_by_user(user.id).await?.is_some() {
        if let Some(profile) = state.store.update_fields(user.id, &fields).await? {
            tracing::debug!("Updated profile for user {}", user.id);
            return Ok(Json(profile));
        }
    }

    let profile = Profile::create(user.id, &fields);
    state.store.insert(&profile).await?;
    tracing::info!("Created profile {} for user {}", profile.id, user.id);

    Ok(Json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_strings_are_left_out_of_the_update_set() {
        let request: ProfileRequest = serde_json::from_value(json!({
            "status": "Developer",
            "skills": "rust, go",
            "company": "",
            "twitter": "https://twitter.com/dev",
            "youtube": ""
        }))
        .unwrap();

        let fields = request.into_fields();
        assert_eq!(fields.company, None);
        assert_eq!(fields.status.as_deref(), Some("Developer"));
        assert_eq!(fields.skills, Some(vec!["rust".to_string(), "go".to_string()]));
        assert_eq!(fields.social.twitter.as_deref(), Some("https://twitter.com/dev"));
        assert_eq!(fields.social.youtube, None);
    }
}
