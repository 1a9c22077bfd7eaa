//! Driving ports for the signed-in user's own profile.

use async_trait::async_trait;

use crate::domain::{Error, ProfilePatchPayload, UserId, UserProfile};

/// Read the caller's profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Profile of `user_id`, without credential material.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<UserProfile, Error>;
}

/// Edit the caller's profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileCommand: Send + Sync {
    /// Apply the writable keys of `payload` and return the updated profile.
    async fn update_profile(
        &self,
        user_id: &UserId,
        payload: ProfilePatchPayload,
    ) -> Result<UserProfile, Error>;
}
