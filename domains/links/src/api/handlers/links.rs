//! Shared-link API handlers
//!
//! - POST /SrDashboard - Publish a drive link under (username, subject)
//! - GET /Jrdashboard - Search by senior name and/or subject (one required)
//! - GET /explore - Browse, optionally narrowed to a subject

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use studyshare_common::{Error, Result, ValidatedJson, ValidatedQuery};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::LinksState;
use crate::domain::entities::{LinkSearch, NewLink, SharedLink};

/// Request for publishing a link.
///
/// Field names follow the existing web client.
#[derive(Debug, Deserialize, Validate)]
pub struct PublishRequest {
    #[serde(default)]
    #[validate(custom(function = "studyshare_common::not_blank"))]
    pub username: String,

    /// Sent by the client but never checked or stored here
    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "studyshare_common::not_blank"))]
    pub subject: String,

    #[serde(default, rename = "driveLink")]
    #[validate(custom(function = "studyshare_common::not_blank"))]
    pub drive_link: String,

    #[serde(default, rename = "OtherLink")]
    #[validate(custom(function = "studyshare_common::not_blank"))]
    pub other_link: String,
}

#[derive(Debug, Serialize)]
pub struct PublishResponse {
    pub message: String,
    #[serde(rename = "driveLink")]
    pub drive_link: String,
}

/// Query params for the junior dashboard
#[derive(Debug, Default, Deserialize, Validate)]
pub struct JuniorDashboardQuery {
    pub seniorname: Option<String>,
    pub subjectname: Option<String>,
}

/// Query params for explore
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ExploreQuery {
    pub subjectname: Option<String>,
}

/// Shared-link response DTO
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: Uuid,
    pub username: String,
    pub subject: String,
    pub file_paths: Vec<String>,
    pub links: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SharedLink> for LinkResponse {
    fn from(l: SharedLink) -> Self {
        Self {
            id: l.id,
            username: l.username,
            subject: l.subject,
            file_paths: l.file_paths,
            links: l.links,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FilesResponse {
    pub files: Vec<LinkResponse>,
}

/// Run a search and turn an empty result into a client-visible 404
async fn search_or_not_found(state: &LinksState, search: LinkSearch) -> Result<FilesResponse> {
    let records = state.repos.links.search(&search).await?;

    if records.is_empty() {
        tracing::debug!(owner = ?search.owner, subject = ?search.subject, "No shared links matched");
        return Err(Error::NotFound("No files found".to_string()));
    }

    Ok(FilesResponse {
        files: records.into_iter().map(Into::into).collect(),
    })
}

/// POST /SrDashboard - Publish a link
pub async fn publish(
    State(state): State<LinksState>,
    ValidatedJson(req): ValidatedJson<PublishRequest>,
) -> Result<Json<PublishResponse>> {
    let link = NewLink::new(req.username, req.subject, req.drive_link, req.other_link)?;
    let record = state.repos.links.publish(&link).await?;

    tracing::info!(
        owner = %record.username,
        subject = %record.subject,
        link_count = record.file_paths.len(),
        "Shared link published"
    );

    Ok(Json(PublishResponse {
        message: "File link saved successfully".to_string(),
        drive_link: link.drive_link,
    }))
}

/// GET /Jrdashboard - Search by senior and/or subject
pub async fn junior_dashboard(
    State(state): State<LinksState>,
    ValidatedQuery(query): ValidatedQuery<JuniorDashboardQuery>,
) -> Result<Json<FilesResponse>> {
    let search = LinkSearch::new(query.seniorname, query.subjectname);
    if search.is_unfiltered() {
        return Err(Error::Validation(
            "Provide seniorname or subjectname".to_string(),
        ));
    }

    Ok(Json(search_or_not_found(&state, search).await?))
}

/// GET /explore - Browse all links, optionally by subject
pub async fn explore(
    State(state): State<LinksState>,
    ValidatedQuery(query): ValidatedQuery<ExploreQuery>,
) -> Result<Json<FilesResponse>> {
    let search = LinkSearch::new(None, query.subjectname);
    Ok(Json(search_or_not_found(&state, search).await?))
}
