//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel row structs and domain types and
//! hold no business rules. Row structs (`models`) and table definitions
//! (`schema`) stay private to this module.
//!
//! # Example
//!
//! ```no_run
//! use apptrack::outbound::persistence::{DbPool, DieselApplicationRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/apptrack")).await?;
//! let applications = DieselApplicationRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_application_repository;
mod diesel_basic_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_application_repository::DieselApplicationRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
