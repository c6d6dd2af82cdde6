use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::models::{Profile, ProfileFields};

/// Errors from profile storage backends
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Profile {0} has no owning user")]
    MissingOwner(Uuid),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Data access for the profile collection, keyed by owning user.
///
/// Methods returning populated profiles replace the `user` id with the owner's
/// `name`/`avatar`; every other method returns the bare id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Cheap connectivity probe for `/health`
    async fn health_check(&self) -> Result<(), StoreError>;

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError>;

    async fn find_by_user_populated(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError>;

    async fn find_all_populated(&self) -> Result<Vec<Profile>, StoreError>;

    async fn insert(&self, profile: &Profile) -> Result<(), StoreError>;

    /// Apply a sparse update to the user's profile and return the new document
    async fn update_fields(
        &self,
        user_id: Uuid,
        fields: &ProfileFields,
    ) -> Result<Option<Profile>, StoreError>;

    /// Persist the whole document (last write wins)
    async fn save(&self, profile: &Profile) -> Result<(), StoreError>;

    async fn delete_by_user(&self, user_id: Uuid) -> Result<bool, StoreError>;

    async fn delete_user(&self, user_id: Uuid) -> Result<bool, StoreError>;
}
