//! Driven port for application record storage.
//!
//! Every method is owner-scoped: adapters must never return or touch a
//! record belonging to a different user, and report such records exactly as
//! if they did not exist.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::applications::{
    Application, ApplicationChanges, ApplicationFields, ApplicationFilter, ApplicationId,
};
use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Failures raised by application store adapters.
    pub enum ApplicationRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "application store connection failed: {message}",
        /// A read or write failed while executing.
        Query { message: String } => "application store query failed: {message}",
    }
}

/// Storage operations for application records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Persist a new record for `owner`, assigning its id and timestamps.
    async fn insert(
        &self,
        owner: &UserId,
        fields: &ApplicationFields,
    ) -> Result<Application, ApplicationRepositoryError>;

    /// Records selected by `filter`, newest `updatedAt` first (ties broken by
    /// id, descending), restricted to the requested page.
    async fn find_page(
        &self,
        filter: &ApplicationFilter,
        page: &PageRequest,
    ) -> Result<Vec<Application>, ApplicationRepositoryError>;

    /// Number of records selected by `filter`, ignoring pagination.
    async fn count(&self, filter: &ApplicationFilter) -> Result<u64, ApplicationRepositoryError>;

    /// A single owned record.
    async fn find_one(
        &self,
        owner: &UserId,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// Apply `changes` to an owned record and bump its `updatedAt`.
    ///
    /// The read-modify-write happens atomically within the adapter. Returns
    /// `None` when no owned record matches.
    async fn update_one(
        &self,
        owner: &UserId,
        id: &ApplicationId,
        changes: &ApplicationChanges,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// Permanently remove an owned record. Returns whether one was removed.
    async fn delete_one(
        &self,
        owner: &UserId,
        id: &ApplicationId,
    ) -> Result<bool, ApplicationRepositoryError>;
}
