//! The application record and its nested parts.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ApplicationStatus, Priority, WorkMode};
use crate::domain::UserId;

/// Store-generated identifier of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(Uuid);

impl ApplicationId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ApplicationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Person connected to an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    /// Full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Job title or relationship, e.g. "Recruiter".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Contact {
    /// Trim every part, dropping blanks.
    #[must_use]
    pub fn normalised(self) -> Self {
        Self {
            name: trim_text(self.name),
            email: trim_text(self.email),
            role: trim_text(self.role),
            phone: trim_text(self.phone),
        }
    }
}

/// Labelled URL attached to an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Link {
    /// Short caption.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Target address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Link {
    /// Trim every part, dropping blanks.
    #[must_use]
    pub fn normalised(self) -> Self {
        Self {
            label: trim_text(self.label),
            url: trim_text(self.url),
        }
    }
}

/// Client-writable part of an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationFields {
    /// Hiring company, never blank.
    pub company: String,
    /// Job title, never blank.
    pub role: String,
    /// Pipeline stage.
    pub status: ApplicationStatus,
    /// User-assigned priority.
    pub priority: Priority,
    /// Working arrangement.
    pub work_mode: WorkMode,
    /// Where the posting was found.
    pub source: Option<String>,
    /// Advertised salary, free text.
    pub salary_range: Option<String>,
    /// Office location.
    pub location: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Date the application was sent.
    pub applied_date: Option<NaiveDate>,
    /// Next scheduled interview.
    pub next_interview_date: Option<NaiveDate>,
    /// Date to chase a response.
    pub follow_up_date: Option<NaiveDate>,
    /// People involved, in the order given.
    pub contacts: Vec<Contact>,
    /// Related links, in the order given.
    pub links: Vec<Link>,
}

impl ApplicationFields {
    /// Fields for a new record with every optional part unset.
    ///
    /// # Examples
    /// ```
    /// use apptrack::domain::applications::{ApplicationFields, ApplicationStatus};
    ///
    /// let fields = ApplicationFields::new("Acme", "Engineer");
    /// assert_eq!(fields.status, ApplicationStatus::Applied);
    /// assert!(fields.contacts.is_empty());
    /// ```
    pub fn new(company: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            role: role.into(),
            status: ApplicationStatus::default(),
            priority: Priority::default(),
            work_mode: WorkMode::default(),
            source: None,
            salary_range: None,
            location: None,
            notes: None,
            applied_date: None,
            next_interview_date: None,
            follow_up_date: None,
            contacts: Vec::new(),
            links: Vec::new(),
        }
    }
}

/// A stored job application.
///
/// `id`, `owner` and both timestamps are maintained by the store; clients
/// can only change [`ApplicationFields`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Record identifier.
    pub id: ApplicationId,
    /// User that created the record.
    pub owner: UserId,
    /// Client-writable content.
    #[serde(flatten)]
    pub fields: ApplicationFields,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

pub(crate) fn trim_text(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    })
}
