//! Application record use-cases.
//!
//! [`ApplicationService`] implements both application driving ports on top
//! of any [`ApplicationRepository`]. It owns the order of operations
//! (required fields, validation, filtering, pagination) and converts store
//! failures into generic internal errors after logging them.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::applications::{
    build_filter, build_pagination, validate_new, validate_update, Application, ApplicationId,
    ApplicationListQuery, ApplicationPayload, ApplicationValidationError,
};
use crate::domain::ports::{
    ApplicationRepository, ApplicationRepositoryError, ApplicationsCommand, ApplicationsQuery,
    DeleteApplicationResponse,
};
use crate::domain::{Error, UserId};

const NOT_FOUND: &str = "Application not found";

/// Convert a validation failure into a client error with field details.
fn validation_error(error: ApplicationValidationError) -> Error {
    Error::invalid_request(error.to_string())
        .with_details(json!({ "field": error.field(), "code": error.code() }))
}

fn store_failure(public_message: &'static str) -> impl Fn(ApplicationRepositoryError) -> Error {
    move |failure| {
        match &failure {
            ApplicationRepositoryError::Connection { message } => {
                error!(%message, operation = public_message, "application store unreachable");
            }
            ApplicationRepositoryError::Query { message } => {
                error!(%message, operation = public_message, "application store query failed");
            }
        }
        Error::internal(public_message)
    }
}

/// Owner-scoped application use-cases.
#[derive(Clone)]
pub struct ApplicationService<R> {
    repo: Arc<R>,
}

impl<R> ApplicationService<R> {
    /// Build a service over `repo`.
    pub const fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> ApplicationsCommand for ApplicationService<R>
where
    R: ApplicationRepository,
{
    async fn create(
        &self,
        owner: &UserId,
        payload: &ApplicationPayload,
    ) -> Result<Application, Error> {
        let fields = validate_new(payload).map_err(validation_error)?;
        let record = self
            .repo
            .insert(owner, &fields)
            .await
            .map_err(store_failure("Failed to create application"))?;
        info!(owner = %owner, application_id = %record.id, "application created");
        Ok(record)
    }

    async fn update(
        &self,
        owner: &UserId,
        id: &ApplicationId,
        payload: &ApplicationPayload,
    ) -> Result<Application, Error> {
        let changes = validate_update(payload).map_err(validation_error)?;
        let record = self
            .repo
            .update_one(owner, id, &changes)
            .await
            .map_err(store_failure("Failed to update application"))?
            .ok_or_else(|| Error::not_found(NOT_FOUND))?;
        debug!(owner = %owner, application_id = %id, "application updated");
        Ok(record)
    }

    async fn delete(
        &self,
        owner: &UserId,
        id: &ApplicationId,
    ) -> Result<DeleteApplicationResponse, Error> {
        let removed = self
            .repo
            .delete_one(owner, id)
            .await
            .map_err(store_failure("Failed to delete application"))?;
        if !removed {
            return Err(Error::not_found(NOT_FOUND));
        }
        info!(owner = %owner, application_id = %id, "application deleted");
        Ok(DeleteApplicationResponse::deleted())
    }
}

#[async_trait]
impl<R> ApplicationsQuery for ApplicationService<R>
where
    R: ApplicationRepository,
{
    async fn list(
        &self,
        owner: &UserId,
        query: &ApplicationListQuery,
    ) -> Result<Page<Application>, Error> {
        let filter = build_filter(owner.clone(), query).map_err(validation_error)?;
        let page = build_pagination(query.page.as_deref(), query.limit.as_deref());

        let (items, total) = futures_util::try_join!(
            self.repo.find_page(&filter, &page),
            self.repo.count(&filter),
        )
        .map_err(store_failure("Failed to load applications"))?;

        debug!(
            owner = %owner,
            page = page.page(),
            returned = items.len(),
            total,
            "applications listed"
        );
        Ok(Page::new(items, page, total))
    }

    async fn get(&self, owner: &UserId, id: &ApplicationId) -> Result<Application, Error> {
        self.repo
            .find_one(owner, id)
            .await
            .map_err(store_failure("Failed to load application"))?
            .ok_or_else(|| Error::not_found(NOT_FOUND))
    }
}

#[cfg(test)]
#[path = "application_service_tests.rs"]
mod tests;
