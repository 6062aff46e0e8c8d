//! Account repository

use crate::domain::entities::UserAccount;
use studyshare_common::{RepositoryError, Result};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find account by email (exact, case-sensitive match)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
        let account = sqlx::query_as::<_, UserAccount>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM users_auth
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Insert a new account.
    ///
    /// Returns `RepositoryError::AlreadyExists` when the email is taken,
    /// including when a concurrent signup won the race.
    pub async fn create(
        &self,
        account: &UserAccount,
    ) -> std::result::Result<UserAccount, RepositoryError> {
        let created = sqlx::query_as::<_, UserAccount>(
            r#"
            INSERT INTO users_auth (id, name, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, name, email, password_hash, role, created_at
            "#,
        )
        .bind(account.id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.role)
        .bind(account.created_at)
        .fetch_optional(&self.pool)
        .await?;

        created.ok_or(RepositoryError::AlreadyExists)
    }
}
