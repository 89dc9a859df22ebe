//! Conveyor — CI/CD pipeline API server.
//!
//! Library crate so integration tests in `tests/` can assemble the router
//! with test doubles for storage and the SCM.

pub mod api;
pub mod authz;
pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod scm;
pub mod store;

/// Shared application state passed to handlers and middleware.
pub struct AppState {
    pub authz: authz::TokenListFlow,
    pub config: config::Config,
}
