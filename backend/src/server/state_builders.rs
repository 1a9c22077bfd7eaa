//! Builds the handler state from the configured stores.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use apptrack::domain::ports::{FixtureLoginService, LoginService};
use apptrack::domain::{ApplicationService, UserProfileService};
use apptrack::inbound::http::state::HttpState;
use apptrack::outbound::memory::{InMemoryApplicationStore, InMemoryUserStore};
use apptrack::outbound::persistence::{DieselApplicationRepository, DieselUserRepository};

use super::ServerConfig;

/// Diesel-backed services when a pool is configured, in-memory otherwise.
///
/// # Errors
/// Fails only if the fixture account used by the in-memory user store does
/// not validate.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let login: Arc<dyn LoginService> = Arc::new(FixtureLoginService);
    let state = if let Some(pool) = &config.db_pool {
        info!("using PostgreSQL stores");
        HttpState::from_services(
            login,
            Arc::new(ApplicationService::new(Arc::new(
                DieselApplicationRepository::new(pool.clone()),
            ))),
            Arc::new(UserProfileService::new(Arc::new(DieselUserRepository::new(
                pool.clone(),
            )))),
        )
    } else {
        warn!("no database configured; records are kept in memory and lost on restart");
        let users = InMemoryUserStore::with_fixture_user()
            .map_err(|err| std::io::Error::other(format!("fixture user is invalid: {err}")))?;
        HttpState::from_services(
            login,
            Arc::new(ApplicationService::new(Arc::new(
                InMemoryApplicationStore::default(),
            ))),
            Arc::new(UserProfileService::new(Arc::new(users))),
        )
    };
    Ok(web::Data::new(state))
}
