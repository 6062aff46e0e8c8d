//! Accounts domain state

use crate::AccountsRepositories;
use sqlx::PgPool;
use std::sync::Arc;
use studyshare_common::{Argon2Hasher, CredentialHasher};

/// Application state for the Accounts domain
#[derive(Clone)]
pub struct AccountsState {
    pub repos: AccountsRepositories,
    pub hasher: Arc<dyn CredentialHasher>,
}

impl AccountsState {
    /// State backed by `pool` with the production Argon2 hasher
    pub fn new(pool: PgPool) -> Self {
        Self {
            repos: AccountsRepositories::new(pool),
            hasher: Arc::new(Argon2Hasher::new()),
        }
    }
}
