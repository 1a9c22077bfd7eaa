//! PostgreSQL-backed `ApplicationRepository` implementation using Diesel ORM.
//!
//! Every statement carries an `owner_id` predicate, so rows belonging to
//! other users are indistinguishable from missing ones. Updates run as a
//! single `UPDATE ... RETURNING`, which makes the read-modify-write atomic
//! without an explicit transaction.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::{Clock, DefaultClock};
use pagination::PageRequest;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{Patch, UserId};
use crate::domain::applications::{
    Application, ApplicationChanges, ApplicationFields, ApplicationFilter, ApplicationId,
    ApplicationStatus, Contact, Link, Priority, WorkMode,
};
use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ApplicationChangeset, ApplicationRow, NewApplicationRow};
use super::pool::{DbPool, PoolError};
use super::schema::applications;

/// Diesel-backed implementation of the [`ApplicationRepository`] port.
#[derive(Clone)]
pub struct DieselApplicationRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselApplicationRepository {
    /// Repository stamping records with the system clock.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self::with_clock(pool, Arc::new(DefaultClock))
    }

    /// Repository stamping records with `clock`.
    #[must_use]
    pub fn with_clock(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn map_pool_error(error: PoolError) -> ApplicationRepositoryError {
    map_basic_pool_error(error, ApplicationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ApplicationRepositoryError {
    map_basic_diesel_error(
        error,
        ApplicationRepositoryError::query,
        ApplicationRepositoryError::connection,
    )
}

/// Escape `LIKE` metacharacters and wrap the needle for a substring match.
///
/// PostgreSQL's default `LIKE` escape character is the backslash.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Compile a domain filter into a boxed `WHERE` clause.
fn filtered(filter: &ApplicationFilter) -> applications::BoxedQuery<'static, Pg> {
    let mut query = applications::table
        .into_boxed()
        .filter(applications::owner_id.eq(*filter.owner().as_uuid()));

    if let Some(status) = filter.status() {
        query = query.filter(applications::status.eq(status.to_owned()));
    }
    if let Some(company) = filter.company() {
        query = query.filter(applications::company.ilike(like_pattern(company)));
    }
    if let Some(search) = filter.search() {
        let pattern = like_pattern(search);
        query = query.filter(
            applications::company
                .ilike(pattern.clone())
                .or(applications::role.ilike(pattern)),
        );
    }
    if let Some(from) = filter.applied_from() {
        query = query.filter(applications::applied_date.ge(from));
    }
    if let Some(to) = filter.applied_to() {
        query = query.filter(applications::applied_date.le(to));
    }
    query
}

fn to_json<T: serde::Serialize>(value: &T, what: &str) -> Result<Value, ApplicationRepositoryError> {
    serde_json::to_value(value)
        .map_err(|err| ApplicationRepositoryError::query(format!("encode {what}: {err}")))
}

fn row_to_application(row: ApplicationRow) -> Result<Application, ApplicationRepositoryError> {
    let id = row.id;
    let corrupt = |column: &str, detail: &dyn std::fmt::Display| {
        ApplicationRepositoryError::query(format!("application {id} has bad {column}: {detail}"))
    };
    let status: ApplicationStatus = row.status.parse().map_err(|err| corrupt("status", &err))?;
    let priority: Priority = row.priority.parse().map_err(|err| corrupt("priority", &err))?;
    let work_mode: WorkMode = row
        .work_mode
        .parse()
        .map_err(|err| corrupt("work_mode", &err))?;
    let contacts: Vec<Contact> =
        serde_json::from_value(row.contacts).map_err(|err| corrupt("contacts", &err))?;
    let links: Vec<Link> =
        serde_json::from_value(row.links).map_err(|err| corrupt("links", &err))?;

    Ok(Application {
        id: ApplicationId::from_uuid(row.id),
        owner: UserId::from_uuid(row.owner_id),
        fields: ApplicationFields {
            company: row.company,
            role: row.role,
            status,
            priority,
            work_mode,
            source: row.source,
            salary_range: row.salary_range,
            location: row.location,
            notes: row.notes,
            applied_date: row.applied_date,
            next_interview_date: row.next_interview_date,
            follow_up_date: row.follow_up_date,
            contacts,
            links,
        },
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn text_change(patch: &Patch<String>) -> Option<Option<&str>> {
    patch
        .as_ref()
        .into_change()
        .map(|value| value.map(String::as_str))
}

fn changeset(
    changes: &ApplicationChanges,
    updated_at: DateTime<Utc>,
) -> Result<ApplicationChangeset<'_>, ApplicationRepositoryError> {
    Ok(ApplicationChangeset {
        company: changes.company.as_deref(),
        role: changes.role.as_deref(),
        status: changes.status.map(ApplicationStatus::as_str),
        priority: changes.priority.map(Priority::as_str),
        work_mode: changes.work_mode.map(WorkMode::as_str),
        source: text_change(&changes.source),
        salary_range: text_change(&changes.salary_range),
        location: text_change(&changes.location),
        notes: text_change(&changes.notes),
        applied_date: changes.applied_date.clone().into_change(),
        next_interview_date: changes.next_interview_date.clone().into_change(),
        follow_up_date: changes.follow_up_date.clone().into_change(),
        contacts: changes
            .contacts
            .as_ref()
            .map(|contacts| to_json(contacts, "contacts"))
            .transpose()?,
        links: changes
            .links
            .as_ref()
            .map(|links| to_json(links, "links"))
            .transpose()?,
        updated_at,
    })
}

#[async_trait]
impl ApplicationRepository for DieselApplicationRepository {
    async fn insert(
        &self,
        owner: &UserId,
        fields: &ApplicationFields,
    ) -> Result<Application, ApplicationRepositoryError> {
        let now = self.clock.utc();
        let row = NewApplicationRow {
            id: Uuid::new_v4(),
            owner_id: *owner.as_uuid(),
            company: &fields.company,
            role: &fields.role,
            status: fields.status.as_str(),
            priority: fields.priority.as_str(),
            work_mode: fields.work_mode.as_str(),
            source: fields.source.as_deref(),
            salary_range: fields.salary_range.as_deref(),
            location: fields.location.as_deref(),
            notes: fields.notes.as_deref(),
            applied_date: fields.applied_date,
            next_interview_date: fields.next_interview_date,
            follow_up_date: fields.follow_up_date,
            contacts: to_json(&fields.contacts, "contacts")?,
            links: to_json(&fields.links, "links")?,
            created_at: now,
            updated_at: now,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let stored = diesel::insert_into(applications::table)
            .values(&row)
            .returning(ApplicationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(application_id = %stored.id, "application row inserted");
        row_to_application(stored)
    }

    async fn find_page(
        &self,
        filter: &ApplicationFilter,
        page: &PageRequest,
    ) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let offset = i64::try_from(page.skip())
            .map_err(|_| ApplicationRepositoryError::query("page offset out of range"))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ApplicationRow> = filtered(filter)
            .order((applications::updated_at.desc(), applications::id.desc()))
            .offset(offset)
            .limit(i64::from(page.limit()))
            .select(ApplicationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_application).collect()
    }

    async fn count(&self, filter: &ApplicationFilter) -> Result<u64, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(total).map_err(|_| ApplicationRepositoryError::query("negative row count"))
    }

    async fn find_one(
        &self,
        owner: &UserId,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ApplicationRow> = applications::table
            .filter(applications::id.eq(id.as_uuid()))
            .filter(applications::owner_id.eq(owner.as_uuid()))
            .select(ApplicationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_application).transpose()
    }

    async fn update_one(
        &self,
        owner: &UserId,
        id: &ApplicationId,
        changes: &ApplicationChanges,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let changeset = changeset(changes, self.clock.utc())?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ApplicationRow> = diesel::update(
            applications::table
                .filter(applications::id.eq(id.as_uuid()))
                .filter(applications::owner_id.eq(owner.as_uuid())),
        )
        .set(&changeset)
        .returning(ApplicationRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        row.map(row_to_application).transpose()
    }

    async fn delete_one(
        &self,
        owner: &UserId,
        id: &ApplicationId,
    ) -> Result<bool, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(
            applications::table
                .filter(applications::id.eq(id.as_uuid()))
                .filter(applications::owner_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
#[path = "diesel_application_repository_tests.rs"]
mod tests;
