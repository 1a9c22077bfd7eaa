//! Driving port for application mutations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::applications::{Application, ApplicationId, ApplicationPayload};
use crate::domain::{Error, UserId};

/// Confirmation returned after a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteApplicationResponse {
    /// Human-readable confirmation.
    pub message: String,
}

impl DeleteApplicationResponse {
    /// The standard confirmation.
    #[must_use]
    pub fn deleted() -> Self {
        Self {
            message: "Application deleted".to_owned(),
        }
    }
}

/// Create, update and delete a user's applications.
///
/// Implementations validate payloads, scope every call to `owner` and report
/// foreign records as not found.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationsCommand: Send + Sync {
    /// Validate `payload` and store it as a new record owned by `owner`.
    async fn create(
        &self,
        owner: &UserId,
        payload: &ApplicationPayload,
    ) -> Result<Application, Error>;

    /// Apply the keys present in `payload` to an owned record.
    async fn update(
        &self,
        owner: &UserId,
        id: &ApplicationId,
        payload: &ApplicationPayload,
    ) -> Result<Application, Error>;

    /// Permanently delete an owned record.
    async fn delete(
        &self,
        owner: &UserId,
        id: &ApplicationId,
    ) -> Result<DeleteApplicationResponse, Error>;
}
