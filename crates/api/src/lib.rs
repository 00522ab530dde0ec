//! HTTP boundary of the gate: authorization middleware, login route, server
//! configuration.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;

pub use middleware::with_gate;
