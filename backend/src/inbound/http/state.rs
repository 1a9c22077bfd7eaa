//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and talk only to domain ports,
//! so they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ApplicationsCommand, ApplicationsQuery, LoginService, UserProfileCommand, UserProfileQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential check for `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Application writes.
    pub applications: Arc<dyn ApplicationsCommand>,
    /// Application reads.
    pub applications_query: Arc<dyn ApplicationsQuery>,
    /// Profile reads.
    pub profile: Arc<dyn UserProfileQuery>,
    /// Profile writes.
    pub profile_command: Arc<dyn UserProfileCommand>,
}

impl HttpState {
    /// Bundle one service implementing both application ports and one
    /// implementing both profile ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use apptrack::domain::ports::FixtureLoginService;
    /// use apptrack::domain::{ApplicationService, UserProfileService};
    /// use apptrack::inbound::http::state::HttpState;
    /// use apptrack::outbound::memory::{InMemoryApplicationStore, InMemoryUserStore};
    ///
    /// let applications = Arc::new(ApplicationService::new(Arc::new(
    ///     InMemoryApplicationStore::default(),
    /// )));
    /// let profiles = Arc::new(UserProfileService::new(Arc::new(
    ///     InMemoryUserStore::with_fixture_user().expect("fixture user"),
    /// )));
    /// let state = HttpState::from_services(Arc::new(FixtureLoginService), applications, profiles);
    /// let _login = state.login.clone();
    /// ```
    #[must_use]
    pub fn from_services<A, P>(
        login: Arc<dyn LoginService>,
        applications: Arc<A>,
        profiles: Arc<P>,
    ) -> Self
    where
        A: ApplicationsCommand + ApplicationsQuery + 'static,
        P: UserProfileQuery + UserProfileCommand + 'static,
    {
        Self {
            login,
            applications: applications.clone(),
            applications_query: applications,
            profile: profiles.clone(),
            profile_command: profiles,
        }
    }
}
