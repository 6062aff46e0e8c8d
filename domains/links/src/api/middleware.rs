//! Links domain state

use crate::LinksRepositories;
use sqlx::PgPool;

/// Application state for the Links domain
#[derive(Clone)]
pub struct LinksState {
    pub repos: LinksRepositories,
}

impl LinksState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repos: LinksRepositories::new(pool),
        }
    }
}
