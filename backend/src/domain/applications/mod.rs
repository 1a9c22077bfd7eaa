//! Job application records: model, write validation and list filtering.

mod application;
mod filter;
mod kinds;
mod validation;

pub use self::application::{Application, ApplicationFields, ApplicationId, Contact, Link};
pub use self::filter::{
    build_filter, build_pagination, ApplicationFilter, ApplicationListQuery,
};
pub use self::kinds::{ApplicationStatus, Priority, UnknownKind, WorkMode};
pub use self::validation::{
    parse_calendar_date, validate, validate_new, validate_update, ApplicationChanges,
    ApplicationPayload, ApplicationValidationError,
};
