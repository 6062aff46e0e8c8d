//! Shared-link repository

use crate::domain::entities::{LinkSearch, NewLink, SharedLink};
use sqlx::{PgPool, Postgres, QueryBuilder};
use studyshare_common::Result;

/// All columns in the files table, used for SELECT and RETURNING clauses.
const LINK_COLUMNS: &str = "\
    id, username, subject, file_paths, links, created_at, updated_at";

#[derive(Clone)]
pub struct LinkRepository {
    pool: PgPool,
}

impl LinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a record for `(owner, subject)` or append to the existing one.
    ///
    /// Single statement keyed by the `(username, subject)` unique constraint:
    /// concurrent publishes to one pair serialize on the row and none is lost.
    pub async fn publish(&self, link: &NewLink) -> Result<SharedLink> {
        let query = format!(
            "INSERT INTO files (id, username, subject, file_paths, links, created_at, updated_at) \
             VALUES ($1, $2, $3, ARRAY[$4::text], $5, NOW(), NOW()) \
             ON CONFLICT (username, subject) DO UPDATE SET \
                 file_paths = array_append(files.file_paths, $4::text), \
                 links = EXCLUDED.links, \
                 updated_at = NOW() \
             RETURNING {LINK_COLUMNS}"
        );
        let record = sqlx::query_as::<_, SharedLink>(&query)
            .bind(link.id)
            .bind(&link.owner)
            .bind(&link.subject)
            .bind(&link.drive_link)
            .bind(&link.other_link)
            .fetch_one(&self.pool)
            .await?;

        Ok(record)
    }

    /// Find the record for one `(owner, subject)` pair
    pub async fn find(&self, owner: &str, subject: &str) -> Result<Option<SharedLink>> {
        let query =
            format!("SELECT {LINK_COLUMNS} FROM files WHERE username = $1 AND subject = $2");
        let record = sqlx::query_as::<_, SharedLink>(&query)
            .bind(owner)
            .bind(subject)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    /// Records matching every criterion in `search`; no criteria returns all.
    pub async fn search(&self, search: &LinkSearch) -> Result<Vec<SharedLink>> {
        let mut builder = search_query(search);
        let records = builder
            .build_query_as::<SharedLink>()
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }
}

fn search_query(search: &LinkSearch) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {LINK_COLUMNS} FROM files"));
    search.filters().push_where(&mut builder);
    builder.push(" ORDER BY created_at ASC, id ASC");
    builder
}
