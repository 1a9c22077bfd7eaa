//! In-process adapters for running without PostgreSQL.
//!
//! The server falls back to these when no database URL is configured; tests
//! use them to drive the services end to end.

mod application_store;
mod user_store;

pub use application_store::InMemoryApplicationStore;
pub use user_store::{InMemoryUserStore, fixture_profile};
