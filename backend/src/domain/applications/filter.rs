//! List query parsing.
//!
//! [`build_filter`] turns raw query parameters into an [`ApplicationFilter`]
//! that stores can evaluate directly ([`ApplicationFilter::matches`]) or
//! compile into their own query language. Pagination parameters never fail;
//! see [`build_pagination`].

use chrono::NaiveDate;
use pagination::PageRequest;
use serde::Deserialize;

use super::{parse_calendar_date, Application, ApplicationValidationError};
use crate::domain::UserId;

/// Raw `GET /apps` query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApplicationListQuery {
    /// Exact status name.
    pub status: Option<String>,
    /// Case-insensitive substring of the company.
    pub company: Option<String>,
    /// Case-insensitive substring of company or role.
    pub search: Option<String>,
    /// Inclusive lower bound on the applied date.
    pub from: Option<String>,
    /// Inclusive upper bound on the applied date.
    pub to: Option<String>,
    /// One-based page number.
    pub page: Option<String>,
    /// Page size.
    pub limit: Option<String>,
}

/// Store-agnostic description of which records a list request selects.
///
/// All clauses combine with AND; the owner clause is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationFilter {
    owner: UserId,
    status: Option<String>,
    company: Option<String>,
    search: Option<String>,
    applied_from: Option<NaiveDate>,
    applied_to: Option<NaiveDate>,
}

impl ApplicationFilter {
    /// Filter selecting every record of `owner`.
    #[must_use]
    pub const fn for_owner(owner: UserId) -> Self {
        Self {
            owner,
            status: None,
            company: None,
            search: None,
            applied_from: None,
            applied_to: None,
        }
    }

    /// Owner whose records are selected.
    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Exact status name to match.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Company substring, matched case-insensitively.
    #[must_use]
    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    /// Company-or-role substring, matched case-insensitively.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Inclusive lower applied-date bound.
    #[must_use]
    pub const fn applied_from(&self) -> Option<NaiveDate> {
        self.applied_from
    }

    /// Inclusive upper applied-date bound.
    #[must_use]
    pub const fn applied_to(&self) -> Option<NaiveDate> {
        self.applied_to
    }

    /// Whether `record` satisfies every clause.
    ///
    /// A record without an applied date fails any date bound.
    #[must_use]
    pub fn matches(&self, record: &Application) -> bool {
        let fields = &record.fields;
        if record.owner != self.owner {
            return false;
        }
        if self.status().is_some_and(|s| s != fields.status.as_str()) {
            return false;
        }
        if self
            .company()
            .is_some_and(|needle| !contains_folded(&fields.company, needle))
        {
            return false;
        }
        if self.search().is_some_and(|needle| {
            !contains_folded(&fields.company, needle) && !contains_folded(&fields.role, needle)
        }) {
            return false;
        }
        let has_bound = self.applied_from.is_some() || self.applied_to.is_some();
        fields.applied_date.map_or(!has_bound, |applied| {
            self.applied_from.is_none_or(|from| applied >= from)
                && self.applied_to.is_none_or(|to| applied <= to)
        })
    }
}

/// Build the owner-scoped filter for a list request.
///
/// Empty parameters are ignored.
///
/// # Errors
/// Returns [`ApplicationValidationError::InvalidFromDate`] or
/// [`ApplicationValidationError::InvalidToDate`] when a bound does not parse.
///
/// # Examples
/// ```
/// use apptrack::domain::applications::{build_filter, ApplicationListQuery};
/// use apptrack::domain::UserId;
///
/// let owner = UserId::random();
/// let query = ApplicationListQuery {
///     company: Some("acme".into()),
///     from: Some(String::new()),
///     ..ApplicationListQuery::default()
/// };
/// let filter = build_filter(owner.clone(), &query).expect("valid query");
/// assert_eq!(filter.owner(), &owner);
/// assert_eq!(filter.company(), Some("acme"));
/// assert_eq!(filter.applied_from(), None);
/// ```
pub fn build_filter(
    owner: UserId,
    query: &ApplicationListQuery,
) -> Result<ApplicationFilter, ApplicationValidationError> {
    let applied_from = date_bound(query.from.as_deref(), ApplicationValidationError::InvalidFromDate)?;
    let applied_to = date_bound(query.to.as_deref(), ApplicationValidationError::InvalidToDate)?;
    Ok(ApplicationFilter {
        owner,
        status: non_empty(query.status.as_deref()),
        company: non_empty(query.company.as_deref()),
        search: non_empty(query.search.as_deref()),
        applied_from,
        applied_to,
    })
}

/// Normalise page and limit parameters.
///
/// Missing or non-numeric values fall back to page 1 and limit 20; limit is
/// clamped to `1..=100`.
#[must_use]
pub fn build_pagination(page: Option<&str>, limit: Option<&str>) -> PageRequest {
    PageRequest::from_raw(page, limit)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|raw| !raw.is_empty()).map(str::to_owned)
}

fn date_bound(
    value: Option<&str>,
    error: ApplicationValidationError,
) -> Result<Option<NaiveDate>, ApplicationValidationError> {
    value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| parse_calendar_date(raw).ok_or(error))
        .transpose()
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
