//! Server harness and shared world for the application tracker scenarios.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use apptrack::Trace;
use apptrack::domain::ports::FixtureLoginService;
use apptrack::domain::{ApplicationService, UserProfileService};
use apptrack::inbound::http::applications;
use apptrack::inbound::http::error::{json_error_handler, query_error_handler};
use apptrack::inbound::http::state::HttpState;
use apptrack::inbound::http::users::{current_user, login, update_current_user};
use apptrack::outbound::memory::{InMemoryApplicationStore, InMemoryUserStore};
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

pub(crate) type Applications = ApplicationService<InMemoryApplicationStore>;

pub(crate) struct TrackerWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) applications: Arc<Applications>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) session_cookie: Option<String>,
    pub(crate) foreign_id: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<TrackerWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(&self.world);
    }
}

fn shutdown(world: &SharedWorld) {
    // The future must not borrow the world: it is held across `block_on`.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn test_session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build()
}

async fn spawn_tracker_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .wrap(test_session_middleware(key.clone()))
            .service(login)
            .service(current_user)
            .service(update_current_user)
            .configure(applications::configure);

        App::new()
            .app_data(http_data.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .wrap(Trace)
            .service(api)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    let applications = Arc::new(ApplicationService::new(Arc::new(
        InMemoryApplicationStore::default(),
    )));
    let profiles = Arc::new(UserProfileService::new(Arc::new(
        InMemoryUserStore::with_fixture_user().expect("fixture user"),
    )));
    let http_state = HttpState::from_services(
        Arc::new(FixtureLoginService),
        applications.clone(),
        profiles,
    );

    let (base_url, server) = local
        .block_on(&runtime, spawn_tracker_server(http_state))
        .expect("spawn tracker server");

    WorldFixture {
        world: Rc::new(RefCell::new(TrackerWorld {
            runtime,
            local,
            base_url,
            server,
            applications,
            last_status: None,
            last_body: None,
            last_trace_id: None,
            session_cookie: None,
            foreign_id: None,
        })),
    }
}
