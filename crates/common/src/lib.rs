//! Shared utilities, configuration, and error handling for StudyShare
//!
//! This crate provides common functionality used across the StudyShare service:
//! - Configuration management following 12-factor principles
//! - Error types and the unified JSON error envelope
//! - Connection pool construction and migrations
//! - Password hashing behind the `CredentialHasher` seam
//! - Parameterized filter building for search queries

pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod extractors;
pub mod filters;

pub use crypto::{Argon2Hasher, CredentialHasher};
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{not_blank, ValidatedJson, ValidatedQuery};
pub use filters::Filters;
