use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserSummary;

/// The `user` slot of a profile: a bare id, or the joined user fields
/// (`null` once the user record is gone).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileOwner {
    Id(Uuid),
    Populated(Option<UserSummary>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl Social {
    pub fn is_empty(&self) -> bool {
        self == &Social::default()
    }

    /// Overwrite only the links set in `other`
    pub fn merge(&mut self, other: &Social) {
        merge_field(&mut self.youtube, &other.youtube);
        merge_field(&mut self.twitter, &other.twitter);
        merge_field(&mut self.facebook, &other.facebook);
        merge_field(&mut self.linkedin, &other.linkedin);
        merge_field(&mut self.instagram, &other.instagram);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: DateTime<Utc>,
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: DateTime<Utc>,
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: ProfileOwner,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub social: Social,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    pub date: DateTime<Utc>,
}

impl Profile {
    /// Build a fresh profile for `user_id` from the supplied fields
    pub fn create(user_id: Uuid, fields: &ProfileFields) -> Self {
        let mut profile = Self {
            id: Uuid::new_v4(),
            user: ProfileOwner::Id(user_id),
            company: None,
            website: None,
            location: None,
            bio: None,
            status: String::new(),
            githubusername: None,
            skills: Vec::new(),
            social: Social::default(),
            experience: Vec::new(),
            education: Vec::new(),
            date: Utc::now(),
        };
        fields.apply_to(&mut profile);
        profile
    }

    /// Prepend so the newest entry sits at index 0
    pub fn add_experience(&mut self, entry: Experience) {
        self.experience.insert(0, entry);
    }

    /// Remove the entry with `id`; returns whether anything was removed
    pub fn remove_experience(&mut self, id: Uuid) -> bool {
        match self.experience.iter().position(|e| e.id == id) {
            Some(index) => {
                self.experience.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn add_education(&mut self, entry: Education) {
        self.education.insert(0, entry);
    }

    pub fn remove_education(&mut self, id: Uuid) -> bool {
        match self.education.iter().position(|e| e.id == id) {
            Some(index) => {
                self.education.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Skills as sent by clients: a comma-separated string or a list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Skills {
    Csv(String),
    List(Vec<String>),
}

impl Skills {
    /// Split on commas (string form) and trim every token, keeping order
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Skills::Csv(csv) => csv.split(',').map(|s| s.trim().to_string()).collect(),
            Skills::List(list) => list.into_iter().map(|s| s.trim().to_string()).collect(),
        }
    }
}

/// Sparse update set: `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFields {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<Vec<String>>,
    pub social: Social,
}

impl ProfileFields {
    /// Merge the present fields onto `profile`
    pub fn apply_to(&self, profile: &mut Profile) {
        merge_field(&mut profile.company, &self.company);
        merge_field(&mut profile.website, &self.website);
        merge_field(&mut profile.location, &self.location);
        merge_field(&mut profile.bio, &self.bio);
        merge_field(&mut profile.githubusername, &self.githubusername);
        if let Some(status) = &self.status {
            profile.status = status.clone();
        }
        if let Some(skills) = &self.skills {
            profile.skills = skills.clone();
        }
        profile.social.merge(&self.social);
    }
}

fn merge_field(target: &mut Option<String>, value: &Option<String>) {
    if let Some(v) = value {
        *target = Some(v.clone());
    }
}
