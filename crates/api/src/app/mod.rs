//! HTTP application wiring (axum router + service wiring).
//!
//! - `services.rs`: constraint set and provider registry built from config
//! - `routes/`: handlers (one file per area)
//! - `dto.rs`: request/response bodies
//! - `errors.rs`: JSON error envelope and status mapping

use std::sync::Arc;

use axum::{Extension, Router};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (entrypoint used by `main.rs` and the tests).
///
/// Every route sits behind the authorization gate; routes meant to be
/// reachable anonymously must be listed as public constraints.
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    let gate = services.authorizer();
    middleware::with_gate(routes::router(), gate).layer(Extension(services))
}
