//! Driven port for user profile storage.
use async_trait::async_trait;

use crate::domain::{ProfileUpdate, UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Failures raised by user store adapters.
    pub enum UserPersistenceError {
        /// The store could not be reached.
        Connection { message: String } => "user store connection failed: {message}",
        /// A read or write failed while executing.
        Query { message: String } => "user store query failed: {message}",
        /// Another account already uses the requested email.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Storage operations for user profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load a profile by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserPersistenceError>;

    /// Apply `update` to a profile and return the stored result.
    ///
    /// Returns `None` when the user does not exist and
    /// [`UserPersistenceError::DuplicateEmail`] when the new email belongs to
    /// another user.
    async fn update_profile(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<UserProfile>, UserPersistenceError>;
}
