//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`ApplicationsCommand`, `ApplicationsQuery`, `LoginService`,
//! `UserProfileQuery`, `UserProfileCommand`) are called by inbound adapters.
//! Driven ports (`ApplicationRepository`, `UserRepository`) are implemented
//! by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod application_repository;
mod applications_command;
mod applications_query;
mod login_service;
mod user_profile;
mod user_repository;

#[cfg(test)]
pub use application_repository::MockApplicationRepository;
pub use application_repository::{ApplicationRepository, ApplicationRepositoryError};
#[cfg(test)]
pub use applications_command::MockApplicationsCommand;
pub use applications_command::{ApplicationsCommand, DeleteApplicationResponse};
#[cfg(test)]
pub use applications_query::MockApplicationsQuery;
pub use applications_query::ApplicationsQuery;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FIXTURE_USER_ID, FixtureLoginService, LoginService};
#[cfg(test)]
pub use user_profile::{MockUserProfileCommand, MockUserProfileQuery};
pub use user_profile::{UserProfileCommand, UserProfileQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
