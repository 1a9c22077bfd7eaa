//! Driving port for application reads.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::applications::{Application, ApplicationId, ApplicationListQuery};
use crate::domain::{Error, UserId};

/// Read a user's applications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationsQuery: Send + Sync {
    /// One page of the owner's records matching `query`, most recently
    /// updated first, with the total match count.
    async fn list(
        &self,
        owner: &UserId,
        query: &ApplicationListQuery,
    ) -> Result<Page<Application>, Error>;

    /// A single owned record.
    async fn get(&self, owner: &UserId, id: &ApplicationId) -> Result<Application, Error>;
}
