use axum::{
    Router,
    routing::{get, post},
};

pub mod login;
pub mod session;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/login", post(login::login))
        .route("/session", get(session::session))
}
