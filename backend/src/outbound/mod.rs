//! Driven adapters: implementations of the domain's storage ports.
//!
//! [`persistence`] talks to PostgreSQL; [`memory`] keeps everything in
//! process for development and tests.

pub mod memory;
pub mod persistence;
