//! Domain entities for the links domain
//!
//! A `SharedLink` groups every drive link a senior published under one
//! subject. `(username, subject)` is unique; publishing to an existing pair
//! appends to `file_paths` and replaces `links`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use studyshare_common::{Error, Filters, Result};
use uuid::Uuid;

/// Column holding the publishing senior's name
pub const OWNER_COLUMN: &str = "username";

/// Column holding the subject key
pub const SUBJECT_COLUMN: &str = "subject";

/// Stored shared-link record
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct SharedLink {
    pub id: Uuid,
    /// Raw username supplied by the publisher, not an account id
    pub username: String,
    pub subject: String,
    /// Drive links in publish order; duplicates are kept
    pub file_paths: Vec<String>,
    /// The single "other link", overwritten on every publish
    pub links: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated publish command
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub id: Uuid,
    pub owner: String,
    pub subject: String,
    pub drive_link: String,
    pub other_link: String,
}

impl NewLink {
    /// Create a publish command; all four values are required
    pub fn new(
        owner: String,
        subject: String,
        drive_link: String,
        other_link: String,
    ) -> Result<Self> {
        let missing: Vec<&str> = [
            ("username", &owner),
            ("subject", &subject),
            ("driveLink", &drive_link),
            ("OtherLink", &other_link),
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

        Ok(Self {
            id: Uuid::new_v4(),
            owner,
            subject,
            drive_link,
            other_link,
        })
    }
}

/// Optional search criteria, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSearch {
    pub owner: Option<String>,
    pub subject: Option<String>,
}

impl LinkSearch {
    pub fn new(owner: Option<String>, subject: Option<String>) -> Self {
        Self { owner, subject }
    }

    /// Fold the criteria into SQL equality filters
    pub fn filters(&self) -> Filters {
        Filters::new()
            .eq(OWNER_COLUMN, self.owner.as_deref())
            .eq(SUBJECT_COLUMN, self.subject.as_deref())
    }

    /// True when no usable (non-blank) criterion is set
    pub fn is_unfiltered(&self) -> bool {
        self.filters().is_empty()
    }
}
