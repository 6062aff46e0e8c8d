//! Repository implementations for Links domain

pub mod links;

use sqlx::PgPool;

pub use links::LinkRepository;

/// Combined repository access for the Links domain
#[derive(Clone)]
pub struct LinksRepositories {
    pub links: LinkRepository,
}

impl LinksRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            links: LinkRepository::new(pool),
        }
    }
}
