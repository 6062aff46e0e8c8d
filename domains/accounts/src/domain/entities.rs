//! Domain entities for the accounts domain

use chrono::{DateTime, Utc};
use serde::Serialize;
use studyshare_common::{Error, Result};
use uuid::Uuid;

/// Registered user account.
///
/// `password_hash` is skipped on serialization; responses go through
/// a dedicated DTO as well.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct UserAccount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Create a new account with validation. The password must already be hashed.
    pub fn new(name: String, email: String, password_hash: String, role: String) -> Result<Self> {
        let account = UserAccount {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role,
            created_at: Utc::now(),
        };
        account.validate()?;
        Ok(account)
    }

    /// Every attribute is required; whitespace-only counts as missing
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("email", &self.email),
            ("name", &self.name),
            ("password_hash", &self.password_hash),
            ("role", &self.role),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(Error::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }
}
