use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use super::manager::DatabaseManager;
use super::models::{Education, Experience, Profile, ProfileFields, ProfileOwner, Social, UserSummary};
use super::store::{ProfileStore, StoreError};

/// Profile columns plus the LEFT JOINed owner fields used for populate
const SELECT_PROFILE: &str = r#"
    SELECT p.id, p.user_id, p.company, p.website, p.location, p.bio, p.status,
           p.githubusername, p.skills, p.social, p.experience, p.education, p.date,
           u.id AS owner_id, u.name AS owner_name, u.avatar AS owner_avatar
    FROM profiles p
    LEFT JOIN users u ON u.id = p.user_id
"#;

#[derive(Debug, FromRow)]
struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    company: Option<String>,
    website: Option<String>,
    location: Option<String>,
    bio: Option<String>,
    status: String,
    githubusername: Option<String>,
    skills: Vec<String>,
    social: Json<Social>,
    experience: Json<Vec<Experience>>,
    education: Json<Vec<Education>>,
    date: DateTime<Utc>,
    owner_id: Option<Uuid>,
    owner_name: Option<String>,
    owner_avatar: Option<String>,
}

impl ProfileRow {
    fn into_profile(self, populate: bool) -> Profile {
        let user = if populate {
            let summary = match (self.owner_id, self.owner_name) {
                (Some(id), Some(name)) => Some(UserSummary {
                    id,
                    name,
                    avatar: self.owner_avatar,
                }),
                _ => None,
            };
            ProfileOwner::Populated(summary)
        } else {
            ProfileOwner::Id(self.user_id)
        };

        Profile {
            id: self.id,
            user,
            company: self.company,
            website: self.website,
            location: self.location,
            bio: self.bio,
            status: self.status,
            githubusername: self.githubusername,
            skills: self.skills,
            social: self.social.0,
            experience: self.experience.0,
            education: self.education.0,
            date: self.date,
        }
    }
}

/// Postgres-backed store; sub-lists and social links live in JSONB columns
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn select_by_user(&self, user_id: Uuid) -> Result<Option<ProfileRow>, StoreError> {
        let sql = format!("{} WHERE p.user_id = $1", SELECT_PROFILE);
        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        DatabaseManager::health_check(&self.pool).await
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        Ok(self.select_by_user(user_id).await?.map(|row| row.into_profile(false)))
    }

    async fn find_by_user_populated(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        Ok(self.select_by_user(user_id).await?.map(|row| row.into_profile(true)))
    }

    async fn find_all_populated(&self) -> Result<Vec<Profile>, StoreError> {
        let sql = format!("{} ORDER BY p.date", SELECT_PROFILE);
        let rows = sqlx::query_as::<_, ProfileRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|row| row.into_profile(true)).collect())
    }

    async fn insert(&self, profile: &Profile) -> Result<(), StoreError> {
        let user_id = match &profile.user {
            ProfileOwner::Id(id) => *id,
            ProfileOwner::Populated(Some(user)) => user.id,
            ProfileOwner::Populated(None) => return Err(StoreError::MissingOwner(profile.id)),
        };

        sqlx::query(
            r#"
            INSERT INTO profiles
                (id, user_id, company, website, location, bio, status, githubusername,
                 skills, social, experience, education, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(profile.id)
        .bind(user_id)
        .bind(&profile.company)
        .bind(&profile.website)
        .bind(&profile.location)
        .bind(&profile.bio)
        .bind(&profile.status)
        .bind(&profile.githubusername)
        .bind(&profile.skills)
        .bind(Json(&profile.social))
        .bind(Json(&profile.experience))
        .bind(Json(&profile.education))
        .bind(profile.date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_fields(
        &self,
        user_id: Uuid,
        fields: &ProfileFields,
    ) -> Result<Option<Profile>, StoreError> {
        // COALESCE keeps stored values for absent fields; jsonb || merges social links by key
        let sql = format!(
            r#"
            WITH p AS (
                UPDATE profiles SET
                    company = COALESCE($2, company),
                    website = COALESCE($3, website),
                    location = COALESCE($4, location),
                    bio = COALESCE($5, bio),
                    status = COALESCE($6, status),
                    githubusername = COALESCE($7, githubusername),
                    skills = COALESCE($8, skills),
                    social = social || $9
                WHERE user_id = $1
                RETURNING *
            )
            {}
            "#,
            SELECT_PROFILE.replace("FROM profiles p", "FROM p")
        );

        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(user_id)
            .bind(&fields.company)
            .bind(&fields.website)
            .bind(&fields.location)
            .bind(&fields.bio)
            .bind(&fields.status)
            .bind(&fields.githubusername)
            .bind(&fields.skills)
            .bind(Json(&fields.social))
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.into_profile(false)))
    }

    async fn save(&self, profile: &Profile) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE profiles SET
                company = $2, website = $3, location = $4, bio = $5, status = $6,
                githubusername = $7, skills = $8, social = $9, experience = $10, education = $11
            WHERE id = $1
            "#,
        )
        .bind(profile.id)
        .bind(&profile.company)
        .bind(&profile.website)
        .bind(&profile.location)
        .bind(&profile.bio)
        .bind(&profile.status)
        .bind(&profile.githubusername)
        .bind(&profile.skills)
        .bind(Json(&profile.social))
        .bind(Json(&profile.experience))
        .bind(Json(&profile.education))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_by_user(&self, user_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
