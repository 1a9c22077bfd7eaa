//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Email uniqueness is enforced by a unique index; a violation on update is
//! reported as [`UserPersistenceError::DuplicateEmail`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, ProfileUpdate, UserId, UserPreferences, UserProfile};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{UserProfileChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            clock: Arc::new(DefaultClock),
        }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_profile(row: UserRow) -> Result<UserProfile, UserPersistenceError> {
    let id = row.id;
    let email = Email::new(&row.email)
        .map_err(|err| UserPersistenceError::query(format!("user {id} has bad email: {err}")))?;
    // A malformed preferences document should not lock the user out.
    let preferences = serde_json::from_value(row.preferences).unwrap_or_else(|err| {
        warn!(user_id = %id, error = %err, "unreadable preferences; using defaults");
        UserPreferences::default()
    });
    Ok(UserProfile {
        id: UserId::from_uuid(id),
        name: row.name,
        email,
        resume_url: row.resume_url,
        headline: row.headline,
        daily_focus: row.daily_focus,
        preferences,
    })
}

fn changeset(
    update: &ProfileUpdate,
    updated_at: DateTime<Utc>,
) -> Result<UserProfileChangeset<'_>, UserPersistenceError> {
    let preferences = update
        .preferences
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|err| UserPersistenceError::query(format!("encode preferences: {err}")))?;
    Ok(UserProfileChangeset {
        name: update.name.as_deref(),
        email: update.email.as_ref().map(AsRef::as_ref),
        headline: update
            .headline
            .as_ref()
            .into_change()
            .map(|value| value.map(String::as_str)),
        daily_focus: update.daily_focus.as_ref(),
        preferences,
        updated_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_profile).transpose()
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<UserProfile>, UserPersistenceError> {
        let changes = changeset(update, self.clock.utc())?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let result = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set(&changes)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional();

        match result {
            Ok(row) => row.map(row_to_profile).transpose(),
            Err(err) if is_unique_violation(&err) => Err(UserPersistenceError::duplicate_email(
                changes.email.unwrap_or_default(),
            )),
            Err(err) => Err(map_diesel_error(err)),
        }
    }
}
