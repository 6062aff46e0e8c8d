//! Route definitions for Links domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::links;
use super::middleware::LinksState;

/// Senior-facing publish route
fn publish_routes() -> Router<LinksState> {
    Router::new().route("/SrDashboard", post(links::publish))
}

/// Junior-facing search routes
fn search_routes() -> Router<LinksState> {
    Router::new()
        .route("/Jrdashboard", get(links::junior_dashboard))
        .route("/explore", get(links::explore))
}

/// Create all Links domain API routes
pub fn routes() -> Router<LinksState> {
    Router::new()
        .merge(publish_routes())
        .merge(search_routes())
}
