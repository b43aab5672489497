//! reqcheck API server library.
//!
//! Exposes the building blocks (config, state, error handling, the
//! `Validated<T>` extractor, routes) so integration tests and the binary
//! entrypoint can both access them.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod query;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
pub mod upload;
