//! Write-side validation for application payloads.
//!
//! Clients send loosely typed JSON; [`validate_new`] and [`validate_update`]
//! turn it into typed values or report the first rule that fails. Rules run
//! in a fixed order (status, priority, work mode, then the three dates, then
//! company/role) so the reported error is deterministic.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::application::trim_text;
use super::{ApplicationFields, ApplicationStatus, Contact, Link, Priority, WorkMode};
use crate::domain::Patch;

/// First rule a payload or query broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationValidationError {
    /// Company or role missing or blank.
    #[error("Company and role are required")]
    MissingCompanyOrRole,
    /// `status` outside its value set.
    #[error("Invalid status value")]
    InvalidStatus,
    /// `priority` outside its value set.
    #[error("Invalid priority value")]
    InvalidPriority,
    /// `workMode` outside its value set.
    #[error("Invalid work mode value")]
    InvalidWorkMode,
    /// `appliedDate` is not a calendar date.
    #[error("Invalid applied date")]
    InvalidAppliedDate,
    /// `nextInterviewDate` is not a calendar date.
    #[error("Invalid next interview date")]
    InvalidNextInterviewDate,
    /// `followUpDate` is not a calendar date.
    #[error("Invalid follow-up date")]
    InvalidFollowUpDate,
    /// List query `from` bound is not a calendar date.
    #[error("Invalid from date")]
    InvalidFromDate,
    /// List query `to` bound is not a calendar date.
    #[error("Invalid to date")]
    InvalidToDate,
}

impl ApplicationValidationError {
    /// Payload or query field the error refers to.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::MissingCompanyOrRole => "company",
            Self::InvalidStatus => "status",
            Self::InvalidPriority => "priority",
            Self::InvalidWorkMode => "workMode",
            Self::InvalidAppliedDate => "appliedDate",
            Self::InvalidNextInterviewDate => "nextInterviewDate",
            Self::InvalidFollowUpDate => "followUpDate",
            Self::InvalidFromDate => "from",
            Self::InvalidToDate => "to",
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MissingCompanyOrRole => "required",
            Self::InvalidStatus | Self::InvalidPriority | Self::InvalidWorkMode => {
                "invalid_enum_value"
            }
            Self::InvalidAppliedDate
            | Self::InvalidNextInterviewDate
            | Self::InvalidFollowUpDate
            | Self::InvalidFromDate
            | Self::InvalidToDate => "invalid_date",
        }
    }
}

/// Raw create/update body.
///
/// Every key is optional so the same shape serves both operations. Keys
/// outside this list, including `owner`, `id` and the timestamps, are
/// silently ignored. Enum and date keys are kept as raw JSON so a wrong type
/// reports the same error as a wrong value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationPayload {
    /// Hiring company.
    pub company: Patch<String>,
    /// Job title.
    pub role: Patch<String>,
    /// Pipeline stage name.
    pub status: Patch<Value>,
    /// Priority name.
    pub priority: Patch<Value>,
    /// Work mode name.
    pub work_mode: Patch<Value>,
    /// Where the posting was found.
    pub source: Patch<String>,
    /// Advertised salary.
    pub salary_range: Patch<String>,
    /// Office location.
    pub location: Patch<String>,
    /// Free-form notes.
    pub notes: Patch<String>,
    /// Date the application was sent.
    pub applied_date: Patch<Value>,
    /// Next scheduled interview.
    pub next_interview_date: Patch<Value>,
    /// Date to chase a response.
    pub follow_up_date: Patch<Value>,
    /// Replacement contact list.
    pub contacts: Patch<Vec<Contact>>,
    /// Replacement link list.
    pub links: Patch<Vec<Link>>,
}

/// Validated changes to apply to a record.
///
/// `None` / [`Patch::Absent`] leaves a field untouched. A `null` enum resets
/// it to its default and a `null` list empties it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationChanges {
    /// Replacement company.
    pub company: Option<String>,
    /// Replacement role.
    pub role: Option<String>,
    /// Replacement status.
    pub status: Option<ApplicationStatus>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Replacement work mode.
    pub work_mode: Option<WorkMode>,
    /// Source change.
    pub source: Patch<String>,
    /// Salary range change.
    pub salary_range: Patch<String>,
    /// Location change.
    pub location: Patch<String>,
    /// Notes change.
    pub notes: Patch<String>,
    /// Applied date change.
    pub applied_date: Patch<NaiveDate>,
    /// Next interview date change.
    pub next_interview_date: Patch<NaiveDate>,
    /// Follow-up date change.
    pub follow_up_date: Patch<NaiveDate>,
    /// Replacement contacts.
    pub contacts: Option<Vec<Contact>>,
    /// Replacement links.
    pub links: Option<Vec<Link>>,
}

impl ApplicationChanges {
    /// Apply the changes in place.
    pub fn apply_to(&self, fields: &mut ApplicationFields) {
        if let Some(company) = &self.company {
            fields.company.clone_from(company);
        }
        if let Some(role) = &self.role {
            fields.role.clone_from(role);
        }
        if let Some(status) = self.status {
            fields.status = status;
        }
        if let Some(priority) = self.priority {
            fields.priority = priority;
        }
        if let Some(work_mode) = self.work_mode {
            fields.work_mode = work_mode;
        }
        self.source.clone().apply_to(&mut fields.source);
        self.salary_range.clone().apply_to(&mut fields.salary_range);
        self.location.clone().apply_to(&mut fields.location);
        self.notes.clone().apply_to(&mut fields.notes);
        self.applied_date.clone().apply_to(&mut fields.applied_date);
        self.next_interview_date
            .clone()
            .apply_to(&mut fields.next_interview_date);
        self.follow_up_date.clone().apply_to(&mut fields.follow_up_date);
        if let Some(contacts) = &self.contacts {
            fields.contacts.clone_from(contacts);
        }
        if let Some(links) = &self.links {
            fields.links.clone_from(links);
        }
    }

    fn into_new_fields(self) -> Result<ApplicationFields, ApplicationValidationError> {
        let (Some(company), Some(role)) = (self.company.clone(), self.role.clone()) else {
            return Err(ApplicationValidationError::MissingCompanyOrRole);
        };
        let mut fields = ApplicationFields::new(company, role);
        self.apply_to(&mut fields);
        Ok(fields)
    }
}

/// Check a payload against the write rules without keeping the result.
///
/// Returns the first broken rule, if any.
///
/// # Examples
/// ```
/// use apptrack::domain::applications::{validate, ApplicationPayload, ApplicationValidationError};
///
/// let payload: ApplicationPayload =
///     serde_json::from_str(r#"{"status":"Hired","appliedDate":"nope"}"#).expect("json");
/// assert_eq!(validate(&payload), Some(ApplicationValidationError::InvalidStatus));
/// ```
#[must_use]
pub fn validate(payload: &ApplicationPayload) -> Option<ApplicationValidationError> {
    validate_update(payload).err()
}

/// Validate a create body: company and role first, then the write rules.
///
/// # Errors
/// Returns the first [`ApplicationValidationError`] the body breaks.
pub fn validate_new(
    payload: &ApplicationPayload,
) -> Result<ApplicationFields, ApplicationValidationError> {
    if required_text(&payload.company).is_none() || required_text(&payload.role).is_none() {
        return Err(ApplicationValidationError::MissingCompanyOrRole);
    }
    validate_update(payload)?.into_new_fields()
}

/// Validate an update body into typed changes.
///
/// # Errors
/// Returns the first [`ApplicationValidationError`] the body breaks.
pub fn validate_update(
    payload: &ApplicationPayload,
) -> Result<ApplicationChanges, ApplicationValidationError> {
    let status = parse_kind(&payload.status, ApplicationValidationError::InvalidStatus)?;
    let priority = parse_kind(&payload.priority, ApplicationValidationError::InvalidPriority)?;
    let work_mode = parse_kind(&payload.work_mode, ApplicationValidationError::InvalidWorkMode)?;
    let applied_date = parse_date_patch(
        &payload.applied_date,
        ApplicationValidationError::InvalidAppliedDate,
    )?;
    let next_interview_date = parse_date_patch(
        &payload.next_interview_date,
        ApplicationValidationError::InvalidNextInterviewDate,
    )?;
    let follow_up_date = parse_date_patch(
        &payload.follow_up_date,
        ApplicationValidationError::InvalidFollowUpDate,
    )?;

    let company = optional_required(&payload.company)?;
    let role = optional_required(&payload.role)?;

    Ok(ApplicationChanges {
        company,
        role,
        status,
        priority,
        work_mode,
        source: text_patch(&payload.source),
        salary_range: text_patch(&payload.salary_range),
        location: text_patch(&payload.location),
        notes: text_patch(&payload.notes),
        applied_date,
        next_interview_date,
        follow_up_date,
        contacts: list_patch(&payload.contacts, Contact::normalised),
        links: list_patch(&payload.links, Link::normalised),
    })
}

/// Parse `YYYY-MM-DD`, an RFC 3339 timestamp (taken as its UTC calendar
/// date) or an offset-less ISO date-time (taken as written).
///
/// # Examples
/// ```
/// use apptrack::domain::applications::parse_calendar_date;
///
/// assert!(parse_calendar_date("2024-02-29").is_some());
/// assert!(parse_calendar_date("2023-02-29").is_none());
/// assert_eq!(
///     parse_calendar_date("2024-03-01T23:30:00-02:00"),
///     parse_calendar_date("2024-03-02"),
/// );
/// assert_eq!(
///     parse_calendar_date("2024-03-01T10:00:00"),
///     parse_calendar_date("2024-03-01"),
/// );
/// ```
#[must_use]
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|stamp| stamp.with_timezone(&Utc).date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|stamp| stamp.date())
        })
}

fn required_text(value: &Patch<String>) -> Option<&str> {
    match value {
        Patch::Set(raw) if !raw.trim().is_empty() => Some(raw.trim()),
        _ => None,
    }
}

fn optional_required(value: &Patch<String>) -> Result<Option<String>, ApplicationValidationError> {
    if value.is_absent() {
        return Ok(None);
    }
    required_text(value)
        .map(|text| Some(text.to_owned()))
        .ok_or(ApplicationValidationError::MissingCompanyOrRole)
}

fn parse_kind<K>(
    value: &Patch<Value>,
    error: ApplicationValidationError,
) -> Result<Option<K>, ApplicationValidationError>
where
    K: std::str::FromStr + Default,
{
    match value {
        Patch::Absent => Ok(None),
        Patch::Clear => Ok(Some(K::default())),
        Patch::Set(Value::String(raw)) if raw.is_empty() => Ok(None),
        Patch::Set(Value::String(raw)) => raw.parse().map(Some).map_err(|_| error),
        Patch::Set(_) => Err(error),
    }
}

fn parse_date_patch(
    value: &Patch<Value>,
    error: ApplicationValidationError,
) -> Result<Patch<NaiveDate>, ApplicationValidationError> {
    match value {
        Patch::Absent => Ok(Patch::Absent),
        Patch::Clear => Ok(Patch::Clear),
        Patch::Set(Value::String(raw)) if raw.trim().is_empty() => Ok(Patch::Clear),
        Patch::Set(Value::String(raw)) => parse_calendar_date(raw).map(Patch::Set).ok_or(error),
        Patch::Set(_) => Err(error),
    }
}

fn text_patch(value: &Patch<String>) -> Patch<String> {
    value.clone().map(|raw| trim_text(Some(raw))).flatten()
}

fn list_patch<T: Clone>(value: &Patch<Vec<T>>, normalise: fn(T) -> T) -> Option<Vec<T>> {
    match value {
        Patch::Absent => None,
        Patch::Clear => Some(Vec::new()),
        Patch::Set(items) => Some(items.iter().cloned().map(normalise).collect()),
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
