//! Profile use-cases for the signed-in user.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use crate::domain::ports::{UserPersistenceError, UserProfileCommand, UserProfileQuery, UserRepository};
use crate::domain::{Error, ProfilePatchPayload, ProfileUpdate, UserId, UserProfile};

fn user_not_found() -> Error {
    Error::not_found("User not found")
}

fn map_persistence_error(public_message: &'static str) -> impl Fn(UserPersistenceError) -> Error {
    move |failure| match failure {
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict("Email already in use")
            .with_details(json!({ "field": "email", "code": "duplicate_email" })),
        UserPersistenceError::Connection { message } => {
            error!(%message, operation = public_message, "user store unreachable");
            Error::internal(public_message)
        }
        UserPersistenceError::Query { message } => {
            error!(%message, operation = public_message, "user store query failed");
            Error::internal(public_message)
        }
    }
}

/// Profile service over a [`UserRepository`].
#[derive(Clone)]
pub struct UserProfileService<R> {
    repo: Arc<R>,
}

impl<R> UserProfileService<R> {
    /// Build a service over `repo`.
    pub const fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> UserProfileQuery for UserProfileService<R>
where
    R: UserRepository,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<UserProfile, Error> {
        self.repo
            .find_by_id(user_id)
            .await
            .map_err(map_persistence_error("Failed to load profile"))?
            .ok_or_else(user_not_found)
    }
}

#[async_trait]
impl<R> UserProfileCommand for UserProfileService<R>
where
    R: UserRepository,
{
    async fn update_profile(
        &self,
        user_id: &UserId,
        payload: ProfilePatchPayload,
    ) -> Result<UserProfile, Error> {
        let update = ProfileUpdate::try_from_payload(payload).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": err.field(), "code": err.code() }))
        })?;
        if update.is_empty() {
            return self.fetch_profile(user_id).await;
        }

        let profile = self
            .repo
            .update_profile(user_id, &update)
            .await
            .map_err(map_persistence_error("Failed to update profile"))?
            .ok_or_else(user_not_found)?;
        info!(user_id = %user_id, "profile updated");
        Ok(profile)
    }
}
