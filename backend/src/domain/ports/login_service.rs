//! Driving port for establishing a session.
//!
//! Credential storage and hashing belong to an external identity provider.
//! The fixture authenticator below stands in for it in development and tests.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Identifier of the account accepted by [`FixtureLoginService`].
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Exchange credentials for a user id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Return the id of the account the credentials belong to.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Accepts `admin` / `password` and nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.username() != "admin" || credentials.password() != "password" {
            return Err(Error::unauthorized("invalid credentials"));
        }
        UserId::new(FIXTURE_USER_ID)
            .map_err(|err| Error::internal(format!("fixture user id is invalid: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_accepts_admin() {
        let creds = LoginCredentials::try_from_parts("admin", "password").expect("creds");
        let id = FixtureLoginService
            .authenticate(&creds)
            .await
            .expect("fixture login");
        assert_eq!(id.as_ref(), FIXTURE_USER_ID);
    }

    #[rstest]
    #[case("admin", "wrong")]
    #[case("guest", "password")]
    #[tokio::test]
    async fn fixture_rejects_other_credentials(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password).expect("creds");
        let err = FixtureLoginService
            .authenticate(&creds)
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
