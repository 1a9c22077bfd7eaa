//! Cookie session access for handlers.
//!
//! Handlers take a [`SessionContext`] extractor and only ever see a
//! [`UserId`]; cookie encoding stays inside actix-session.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Session wrapper exposing the signed-in user.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an actix session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record `user_id` as the signed-in user, rotating the session id.
    ///
    /// # Errors
    /// Returns an internal error when the session cannot be serialised.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|err| Error::internal(format!("session write failed: {err}")))
    }

    /// The signed-in user, if any. A corrupt value counts as signed out.
    ///
    /// # Errors
    /// Returns an internal error when the session cannot be read.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|err| Error::internal(format!("session read failed: {err}")))?;
        Ok(raw.and_then(|value| {
            UserId::new(value)
                .inspect_err(|err| warn!(error = %err, "discarding malformed session user id"))
                .ok()
        }))
    }

    /// The signed-in user, or `401 login required`.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::Unauthorized`] when nobody is
    /// signed in.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        Box::pin(async move { session.await.map(Self::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    const ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    async fn sign_in(session: SessionContext) -> Result<HttpResponse, Error> {
        session.persist_user(&UserId::new(ID).map_err(|e| Error::internal(e.to_string()))?)?;
        Ok(HttpResponse::Ok().finish())
    }

    async fn whoami(session: SessionContext) -> Result<HttpResponse, Error> {
        Ok(HttpResponse::Ok().body(session.require_user_id()?.to_string()))
    }

    async fn corrupt(session: Session) -> HttpResponse {
        match session.insert(USER_ID_KEY, "not-a-uuid") {
            Ok(()) => HttpResponse::Ok().finish(),
            Err(_) => HttpResponse::InternalServerError().finish(),
        }
    }

    #[actix_web::test]
    async fn signed_in_user_survives_round_trip() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/in", web::post().to(sign_in))
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::post().uri("/in").to_request()).await;
        let cookie = session_cookie(&res).expect("session cookie issued");
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/me").cookie(cookie).to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, ID);
    }

    #[actix_web::test]
    async fn anonymous_and_corrupt_sessions_are_unauthorised() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/corrupt", web::post().to(corrupt))
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let anonymous =
            test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

        let res =
            test::call_service(&app, test::TestRequest::post().uri("/corrupt").to_request()).await;
        let cookie = session_cookie(&res).expect("session cookie issued");
        let corrupted = test::call_service(
            &app,
            test::TestRequest::get().uri("/me").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(corrupted.status(), StatusCode::UNAUTHORIZED);
    }
}
