//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Repositories convert them
//! to and from domain values.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use super::schema::{applications, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub resume_url: Option<String>,
    pub headline: Option<String>,
    pub daily_focus: Vec<String>,
    pub preferences: Value,
    #[expect(dead_code, reason = "selected for parity with the table; not exposed")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "selected for parity with the table; not exposed")]
    pub updated_at: DateTime<Utc>,
}

/// Changeset for `PATCH /users/me`.
///
/// `None` skips a column; `Some(None)` writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileChangeset<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub headline: Option<Option<&'a str>>,
    pub daily_focus: Option<&'a Vec<String>>,
    pub preferences: Option<Value>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the applications table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ApplicationRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub company: String,
    pub role: String,
    pub status: String,
    pub priority: String,
    pub work_mode: String,
    pub source: Option<String>,
    pub salary_range: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub applied_date: Option<NaiveDate>,
    pub next_interview_date: Option<NaiveDate>,
    pub follow_up_date: Option<NaiveDate>,
    pub contacts: Value,
    pub links: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for new application records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = applications)]
pub(crate) struct NewApplicationRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub company: &'a str,
    pub role: &'a str,
    pub status: &'a str,
    pub priority: &'a str,
    pub work_mode: &'a str,
    pub source: Option<&'a str>,
    pub salary_range: Option<&'a str>,
    pub location: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub applied_date: Option<NaiveDate>,
    pub next_interview_date: Option<NaiveDate>,
    pub follow_up_date: Option<NaiveDate>,
    pub contacts: Value,
    pub links: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for owner-scoped partial updates.
///
/// `updated_at` is always written, so the changeset is never empty.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = applications)]
pub(crate) struct ApplicationChangeset<'a> {
    pub company: Option<&'a str>,
    pub role: Option<&'a str>,
    pub status: Option<&'a str>,
    pub priority: Option<&'a str>,
    pub work_mode: Option<&'a str>,
    pub source: Option<Option<&'a str>>,
    pub salary_range: Option<Option<&'a str>>,
    pub location: Option<Option<&'a str>>,
    pub notes: Option<Option<&'a str>>,
    pub applied_date: Option<Option<NaiveDate>>,
    pub next_interview_date: Option<Option<NaiveDate>>,
    pub follow_up_date: Option<Option<NaiveDate>>,
    pub contacts: Option<Value>,
    pub links: Option<Value>,
    pub updated_at: DateTime<Utc>,
}
