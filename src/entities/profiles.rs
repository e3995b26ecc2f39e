use std::{fmt, sync::Arc};

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Row};

use super::{
    queries::{PROFILES_WITH_ANY_PREFERENCE_QUERY, PROFILE_BY_ID_QUERY, UPSERT_PROFILE_QUERY},
    StoreError,
};
use crate::{
    components::database::{DBConnection, DatabaseComponent},
    domain::profile::Profile,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfilesRepositoryImplementation {
    /// Single-document lookup by id.
    async fn get_profile(&self, profile_id: &str) -> Result<Option<Profile>, StoreError>;

    /// Every profile whose preferences contain at least one of `preferences`.
    /// An empty `preferences` list matches nothing.
    async fn get_profiles_with_any_preference(
        &self,
        preferences: &[String],
    ) -> Result<Vec<Profile>, StoreError>;

    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct ProfilesRepository {
    db_connection: Arc<Option<DBConnection>>,
}

impl ProfilesRepository {
    pub fn new(db: Arc<Option<DBConnection>>) -> Self {
        Self { db_connection: db }
    }
}

impl fmt::Debug for ProfilesRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfilesRepository")
            .field("db_connection has value", &self.db_connection.is_some())
            .finish()
    }
}

fn profile_from_row(row: &PgRow) -> Result<Profile, sqlx::Error> {
    Ok(Profile {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        preferences: row.try_get("preferences")?,
        college_year: row.try_get("college_year")?,
    })
}

#[async_trait]
impl ProfilesRepositoryImplementation for ProfilesRepository {
    #[tracing::instrument(name = "Get profile from DB")]
    async fn get_profile(&self, profile_id: &str) -> Result<Option<Profile>, StoreError> {
        let pool = DatabaseComponent::get_connection(&self.db_connection)?;

        let row = sqlx::query(PROFILE_BY_ID_QUERY)
            .bind(profile_id)
            .fetch_optional(pool)
            .await?;

        match row {
            Some(row) => Ok(Some(profile_from_row(&row)?)),
            None => Ok(None),
        }
    }

    #[tracing::instrument(name = "Get profiles sharing preferences from DB")]
    async fn get_profiles_with_any_preference(
        &self,
        preferences: &[String],
    ) -> Result<Vec<Profile>, StoreError> {
        if preferences.is_empty() {
            return Ok(vec![]);
        }

        let pool = DatabaseComponent::get_connection(&self.db_connection)?;

        let rows = sqlx::query(PROFILES_WITH_ANY_PREFERENCE_QUERY)
            .bind(preferences.to_vec())
            .fetch_all(pool)
            .await
            .map_err(|err| {
                log::error!("Couldn't fetch profiles for preferences {preferences:?}, {err}");
                err
            })?;

        let profiles = rows
            .iter()
            .map(profile_from_row)
            .collect::<Result<Vec<Profile>, sqlx::Error>>()?;

        Ok(profiles)
    }

    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        let pool = DatabaseComponent::get_connection(&self.db_connection)?;

        sqlx::query(UPSERT_PROFILE_QUERY)
            .bind(&profile.id)
            .bind(&profile.name)
            .bind(&profile.preferences)
            .bind(&profile.college_year)
            .execute(pool)
            .await?;

        Ok(())
    }
}
