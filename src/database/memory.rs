use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Profile, ProfileFields, ProfileOwner, User, UserSummary};
use super::store::{ProfileStore, StoreError};

/// In-process store for development and tests
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<Uuid, Profile>>,
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user record, standing in for the identity service
    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn user_exists(&self, user_id: Uuid) -> bool {
        self.users.read().await.contains_key(&user_id)
    }

    async fn populate(&self, mut profile: Profile) -> Profile {
        let owner = owner_id(&profile);
        let users = self.users.read().await;
        profile.user = ProfileOwner::Populated(owner.and_then(|id| users.get(&id)).map(UserSummary::from));
        profile
    }
}

fn owner_id(profile: &Profile) -> Option<Uuid> {
    match &profile.user {
        ProfileOwner::Id(id) => Some(*id),
        ProfileOwner::Populated(user) => user.as_ref().map(|u| u.id),
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn find_by_user_populated(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        let profile = self.profiles.read().await.get(&user_id).cloned();
        match profile {
            Some(profile) => Ok(Some(self.populate(profile).await)),
            None => Ok(None),
        }
    }

    async fn find_all_populated(&self) -> Result<Vec<Profile>, StoreError> {
        let mut profiles: Vec<Profile> = self.profiles.read().await.values().cloned().collect();
        profiles.sort_by_key(|p| p.date);

        let mut populated = Vec::with_capacity(profiles.len());
        for profile in profiles {
            populated.push(self.populate(profile).await);
        }
        Ok(populated)
    }

    async fn insert(&self, profile: &Profile) -> Result<(), StoreError> {
        let user_id = owner_id(profile).ok_or(StoreError::MissingOwner(profile.id))?;
        let mut stored = profile.clone();
        stored.user = ProfileOwner::Id(user_id);
        self.profiles.write().await.insert(user_id, stored);
        Ok(())
    }

    async fn update_fields(
        &self,
        user_id: Uuid,
        fields: &ProfileFields,
    ) -> Result<Option<Profile>, StoreError> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles.get_mut(&user_id).map(|profile| {
            fields.apply_to(profile);
            profile.clone()
        }))
    }

    async fn save(&self, profile: &Profile) -> Result<(), StoreError> {
        let mut profiles = self.profiles.write().await;
        if let Some(stored) = profiles.values_mut().find(|p| p.id == profile.id) {
            let owner = stored.user.clone();
            *stored = profile.clone();
            stored.user = owner;
        }
        Ok(())
    }

    async fn delete_by_user(&self, user_id: Uuid) -> Result<bool, StoreError> {
        Ok(self.profiles.write().await.remove(&user_id).is_some())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<bool, StoreError> {
        Ok(self.users.write().await.remove(&user_id).is_some())
    }
}
