//! Domain types, rules and use-cases.
//!
//! Nothing in this module knows about HTTP or SQL. Inbound adapters call the
//! driving ports in [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`applications`]: application records, write validation, list filters.
//! - [`ApplicationService`]: owner-scoped application use-cases.
//! - [`UserProfile`] and [`UserProfileService`]: the signed-in user's profile.

pub mod applications;
pub mod ports;

mod application_service;
mod auth;
mod error;
mod patch;
mod trace_id;
mod user;
mod user_profile_service;

pub use self::application_service::ApplicationService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::patch::Patch;
pub use self::trace_id::TraceId;
pub use self::user::{
    DAILY_FOCUS_MAX, Email, NotificationPreferences, PrivacyPreferences, ProfilePatchPayload,
    ProfileUpdate, UserId, UserPreferences, UserProfile, UserValidationError,
};
pub use self::user_profile_service::UserProfileService;
