//! Account API handlers
//!
//! Implements the credential operations:
//! - POST /signup - Register a new account
//! - POST /login - Verify credentials and return the account profile

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use studyshare_common::{CredentialHasher, Error, RepositoryError, Result, ValidatedJson};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::AccountsState;
use crate::domain::entities::UserAccount;

/// Request for registering an account
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(custom(function = "studyshare_common::not_blank"))]
    pub name: String,

    #[serde(default)]
    #[validate(custom(function = "studyshare_common::not_blank"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "studyshare_common::not_blank"))]
    pub password: String,

    #[serde(default)]
    #[validate(custom(function = "studyshare_common::not_blank"))]
    pub role: String,
}

/// Request for logging in
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom(function = "studyshare_common::not_blank"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "studyshare_common::not_blank"))]
    pub password: String,
}

/// Plain confirmation body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Public view of an account (never carries the password hash)
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<UserAccount> for AccountResponse {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            role: account.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: AccountResponse,
}

/// Run a hasher call on the blocking pool; Argon2 is deliberately slow
async fn run_hasher<T, F>(hasher: &Arc<dyn CredentialHasher>, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn CredentialHasher) -> Result<T> + Send + 'static,
{
    let hasher = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || f(hasher.as_ref()))
        .await
        .map_err(|e| Error::Internal(format!("Password hashing task failed: {}", e)))?
}

/// Create an account after checking the email is free
pub async fn register(state: &AccountsState, req: SignupRequest) -> Result<UserAccount> {
    if state
        .repos
        .accounts
        .find_by_email(&req.email)
        .await?
        .is_some()
    {
        tracing::info!(email = %req.email, "Signup rejected: email already registered");
        return Err(Error::DuplicateEmail);
    }

    let password = req.password;
    let password_hash = run_hasher(&state.hasher, move |h| h.hash(&password)).await?;

    let account = UserAccount::new(req.name, req.email, password_hash, req.role)?;
    let created = state
        .repos
        .accounts
        .create(&account)
        .await
        .map_err(signup_conflict)?;

    tracing::info!(user_id = %created.id, role = %created.role, "Account registered");
    Ok(created)
}

/// A lost race on the unique email index is the same outcome as the fast-path check
fn signup_conflict(err: RepositoryError) -> Error {
    match err {
        RepositoryError::AlreadyExists => {
            tracing::info!("Signup rejected: email registered concurrently");
            Error::DuplicateEmail
        }
        other => other.into(),
    }
}

/// Look up an account by email and verify its password
pub async fn authenticate(state: &AccountsState, req: LoginRequest) -> Result<UserAccount> {
    let account = state
        .repos
        .accounts
        .find_by_email(&req.email)
        .await?
        .ok_or(Error::AccountNotFound)?;

    let password = req.password;
    let stored_hash = account.password_hash.clone();
    let matches = run_hasher(&state.hasher, move |h| h.verify(&password, &stored_hash)).await?;

    if !matches {
        tracing::info!(user_id = %account.id, "Login rejected: password mismatch");
        return Err(Error::InvalidCredentials);
    }

    Ok(account)
}

/// POST /signup - Register a new account
pub async fn signup(
    State(state): State<AccountsState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    register(&state, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// POST /login - Verify credentials
pub async fn login(
    State(state): State<AccountsState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let account = authenticate(&state, req).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user: account.into(),
    }))
}
