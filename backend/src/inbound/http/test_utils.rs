//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;

use crate::domain::ports::FixtureLoginService;
use crate::domain::{ApplicationService, UserProfileService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryApplicationStore, InMemoryUserStore};

/// Cookie name used by [`test_session_middleware`].
pub const TEST_SESSION_COOKIE: &str = "session";

/// Session middleware with a throwaway key and plain-HTTP cookies.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(TEST_SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set by `res`, detached from the response lifetime.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == TEST_SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// Handler state wired to fresh in-memory stores and the fixture login.
pub fn memory_state() -> HttpState {
    let applications = Arc::new(ApplicationService::new(Arc::new(
        InMemoryApplicationStore::default(),
    )));
    let profiles = Arc::new(UserProfileService::new(Arc::new(
        InMemoryUserStore::with_fixture_user().expect("fixture user"),
    )));
    HttpState::from_services(Arc::new(FixtureLoginService), applications, profiles)
}

/// Log in as the fixture user through `POST /api/v1/login`.
pub async fn sign_in<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(serde_json::json!({ "username": "admin", "password": "password" }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "fixture login failed: {}", res.status());
    session_cookie(&res).expect("login sets a session cookie")
}
