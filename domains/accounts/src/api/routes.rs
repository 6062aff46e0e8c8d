//! Route definitions for Accounts domain API

use axum::{routing::post, Router};

use super::handlers::accounts;
use super::middleware::AccountsState;

/// Create all Accounts domain API routes
pub fn routes() -> Router<AccountsState> {
    Router::new()
        .route("/signup", post(accounts::signup))
        .route("/login", post(accounts::login))
}
