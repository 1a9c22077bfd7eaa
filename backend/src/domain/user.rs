//! User identity and profile model.
//!
//! Credentials and reset tokens are owned by an external identity service and
//! never appear here; this module only models the profile a signed-in user can
//! read and edit.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Patch;

/// Maximum number of daily focus items a profile may hold.
pub const DAILY_FOCUS_MAX: usize = 3;

/// Validation errors raised while building user values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier was empty.
    #[error("user id must not be empty")]
    EmptyId,
    /// Identifier was not a canonical UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// Name was missing or blank.
    #[error("Name is required")]
    EmptyName,
    /// Email did not look like an address.
    #[error("Invalid email address")]
    InvalidEmail,
    /// More daily focus items than allowed.
    #[error("Daily focus can hold at most {max} items")]
    TooManyFocusItems {
        /// Allowed maximum.
        max: usize,
    },
}

impl UserValidationError {
    /// Payload field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::InvalidId => "id",
            Self::EmptyName => "name",
            Self::InvalidEmail => "email",
            Self::TooManyFocusItems { .. } => "dailyFocus",
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyId => "empty_id",
            Self::InvalidId => "invalid_id",
            Self::EmptyName => "empty_name",
            Self::InvalidEmail => "invalid_email",
            Self::TooManyFocusItems { .. } => "too_many_focus_items",
        }
    }
}

/// Stable user identifier stored as a UUID.
///
/// Keeps the caller's string form so it round-trips unchanged through
/// sessions and logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    ///
    /// # Errors
    /// Returns [`UserValidationError::EmptyId`] or
    /// [`UserValidationError::InvalidId`] for unusable input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, raw.to_owned()))
    }

    /// Wrap a UUID read back from storage.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.1
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lower-cased, trimmed email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl Email {
    /// Normalise and validate an address.
    ///
    /// # Errors
    /// Returns [`UserValidationError::InvalidEmail`] when the trimmed input
    /// does not look like `local@domain.tld`.
    ///
    /// # Examples
    /// ```
    /// use apptrack::domain::Email;
    ///
    /// let email = Email::new("  Ada@Example.COM ").expect("valid address");
    /// assert_eq!(email.as_ref(), "ada@example.com");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Reminder toggles. Every switch defaults to on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationPreferences {
    /// Weekly summary email.
    pub weekly_digest: bool,
    /// Reminder before scheduled interviews.
    pub interview_reminders: bool,
    /// Reminder to follow up on open applications.
    pub application_reminders: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            weekly_digest: true,
            interview_reminders: true,
            application_reminders: true,
        }
    }
}

/// Privacy toggles. Every switch defaults to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrivacyPreferences {
    /// Profile visible to other users.
    pub public_profile: bool,
    /// Monthly data export email.
    pub monthly_export: bool,
}

/// Job search preferences stored on the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPreferences {
    /// Preferred work arrangement, free text.
    pub work_mode_default: Option<String>,
    /// Salary expectation, free text.
    pub target_salary: Option<String>,
    /// Reminder toggles.
    pub notifications: NotificationPreferences,
    /// Privacy toggles.
    pub privacy: PrivacyPreferences,
}

impl UserPreferences {
    /// Trim free-text fields, dropping blanks.
    #[must_use]
    pub fn normalised(self) -> Self {
        Self {
            work_mode_default: trimmed(self.work_mode_default),
            target_salary: trimmed(self.target_salary),
            ..self
        }
    }
}

/// Profile of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Stable identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Unique contact address.
    pub email: Email,
    /// Link to an uploaded resume.
    #[serde(default)]
    pub resume_url: Option<String>,
    /// One-line professional summary.
    #[serde(default)]
    pub headline: Option<String>,
    /// Up to [`DAILY_FOCUS_MAX`] short goals.
    #[serde(default)]
    pub daily_focus: Vec<String>,
    /// Job search preferences.
    #[serde(default)]
    pub preferences: UserPreferences,
}

/// Raw `PATCH /users/me` body.
///
/// Only the keys below are writable; anything else in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfilePatchPayload {
    /// New display name.
    pub name: Patch<String>,
    /// New email address.
    pub email: Patch<String>,
    /// New headline; `null` clears it.
    pub headline: Patch<String>,
    /// Replacement focus list; `null` empties it.
    pub daily_focus: Patch<Vec<String>>,
    /// Replacement preferences; `null` restores defaults.
    pub preferences: Patch<UserPreferences>,
}

/// Validated profile changes ready to persist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement email.
    pub email: Option<Email>,
    /// Headline change.
    pub headline: Patch<String>,
    /// Replacement focus list.
    pub daily_focus: Option<Vec<String>>,
    /// Replacement preferences.
    pub preferences: Option<UserPreferences>,
}

impl ProfileUpdate {
    /// Validate a raw patch body.
    ///
    /// # Errors
    /// Returns the first [`UserValidationError`] found, checking name, then
    /// email, then the focus list.
    pub fn try_from_payload(payload: ProfilePatchPayload) -> Result<Self, UserValidationError> {
        let name = match payload.name {
            Patch::Absent => None,
            Patch::Clear => return Err(UserValidationError::EmptyName),
            Patch::Set(raw) => {
                let name = raw.trim();
                if name.is_empty() {
                    return Err(UserValidationError::EmptyName);
                }
                Some(name.to_owned())
            }
        };

        let email = match payload.email {
            Patch::Absent => None,
            Patch::Clear => return Err(UserValidationError::InvalidEmail),
            Patch::Set(raw) => Some(Email::new(raw)?),
        };

        let daily_focus = match payload.daily_focus {
            Patch::Absent => None,
            Patch::Clear => Some(Vec::new()),
            Patch::Set(items) => Some(normalise_focus(items)?),
        };

        let preferences = match payload.preferences {
            Patch::Absent => None,
            Patch::Clear => Some(UserPreferences::default()),
            Patch::Set(prefs) => Some(prefs.normalised()),
        };

        Ok(Self {
            name,
            email,
            headline: payload.headline.map(|h| trimmed(Some(h))).flatten(),
            daily_focus,
            preferences,
        })
    }

    /// Whether the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.headline.is_absent()
            && self.daily_focus.is_none()
            && self.preferences.is_none()
    }

    /// Apply the changes to a loaded profile.
    pub fn apply_to(self, profile: &mut UserProfile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(email) = self.email {
            profile.email = email;
        }
        self.headline.apply_to(&mut profile.headline);
        if let Some(focus) = self.daily_focus {
            profile.daily_focus = focus;
        }
        if let Some(preferences) = self.preferences {
            profile.preferences = preferences;
        }
    }
}

fn normalise_focus(items: Vec<String>) -> Result<Vec<String>, UserValidationError> {
    let focus: Vec<String> = items
        .into_iter()
        .filter_map(|item| trimmed(Some(item)))
        .collect();
    if focus.len() > DAILY_FOCUS_MAX {
        return Err(UserValidationError::TooManyFocusItems {
            max: DAILY_FOCUS_MAX,
        });
    }
    Ok(focus)
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    })
}

#[cfg(test)]
mod tests;
