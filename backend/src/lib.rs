//! Job application tracker backend.
//!
//! Layout follows ports and adapters:
//! - [`domain`]: records, validation, filters and use-cases.
//! - [`inbound`]: the actix-web REST adapter.
//! - [`outbound`]: PostgreSQL and in-memory store adapters.
//! - [`middleware`]: request tracing.
//! - [`doc`]: the OpenAPI document.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
