//! Repository implementations for Accounts domain

pub mod accounts;

use sqlx::PgPool;

pub use accounts::AccountRepository;

/// Combined repository access for the Accounts domain
#[derive(Clone)]
pub struct AccountsRepositories {
    pub accounts: AccountRepository,
}

impl AccountsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            accounts: AccountRepository::new(pool),
        }
    }
}
