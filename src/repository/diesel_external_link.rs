//! External link repository.
//!
//! Same regeneration discipline as internal links: scoped delete of the
//! automatic subset plus insert-or-ignore keyed on (article, url).

use diesel::prelude::*;

use super::diesel_models::{ExternalLinkRecord, NewExternalLink};
use super::diesel_pool::{run_blocking, SqlitePool};
use super::parse_datetime;
use crate::models::{AuthoritySourceType, ExternalLink, VerificationStatus};
use crate::schema::external_links;

impl From<ExternalLinkRecord> for ExternalLink {
    fn from(record: ExternalLinkRecord) -> Self {
        ExternalLink {
            id: record.id,
            article_id: record.article_id,
            url: record.url,
            domain: record.domain,
            anchor_text: record.anchor_text,
            source_type: AuthoritySourceType::from_str(&record.source_type)
                .unwrap_or(AuthoritySourceType::Custom),
            is_automatic: record.is_automatic != 0,
            verification_status: VerificationStatus::from_str(&record.verification_status)
                .unwrap_or(VerificationStatus::Pending),
            created_at: parse_datetime(&record.created_at),
        }
    }
}

/// Diesel-based external link repository.
#[derive(Clone)]
pub struct ExternalLinkRepository {
    pool: SqlitePool,
}

impl ExternalLinkRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All external links of an article.
    pub async fn for_article(
        &self,
        article_id: i32,
    ) -> Result<Vec<ExternalLink>, diesel::result::Error> {
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            external_links::table
                .filter(external_links::article_id.eq(article_id))
                .order(external_links::id.asc())
                .load::<ExternalLinkRecord>(conn)
        })
        .await
        .map(|records| records.into_iter().map(ExternalLink::from).collect())
    }

    /// Insert a single link; duplicates of (article, url) are a no-op.
    /// Used for manually curated links.
    pub async fn insert(&self, link: &ExternalLink) -> Result<bool, diesel::result::Error> {
        let url = link.url.clone();
        let domain = link.domain.clone();
        let anchor_text = link.anchor_text.clone();
        let source_type = link.source_type.as_str();
        let status = link.verification_status.as_str();
        let article_id = link.article_id;
        let is_automatic = i32::from(link.is_automatic);
        let created_at = link.created_at.to_rfc3339();
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            let inserted = diesel::insert_or_ignore_into(external_links::table)
                .values(NewExternalLink {
                    article_id,
                    url: &url,
                    domain: &domain,
                    anchor_text: &anchor_text,
                    source_type,
                    is_automatic,
                    verification_status: status,
                    created_at: &created_at,
                })
                .execute(conn)?;
            Ok(inserted > 0)
        })
        .await
    }

    /// Replace the automatic link set for an article in one transaction.
    /// Returns the number of rows actually inserted.
    pub async fn replace_automatic(
        &self,
        article_id: i32,
        links: Vec<ExternalLink>,
    ) -> Result<usize, diesel::result::Error> {
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            conn.transaction::<_, diesel::result::Error, _>(|conn| {
                diesel::delete(
                    external_links::table
                        .filter(external_links::article_id.eq(article_id))
                        .filter(external_links::is_automatic.eq(1)),
                )
                .execute(conn)?;

                let mut created = 0;
                for link in &links {
                    let created_at = link.created_at.to_rfc3339();
                    created += diesel::insert_or_ignore_into(external_links::table)
                        .values(NewExternalLink {
                            article_id,
                            url: &link.url,
                            domain: &link.domain,
                            anchor_text: &link.anchor_text,
                            source_type: link.source_type.as_str(),
                            is_automatic: 1,
                            verification_status: VerificationStatus::Pending.as_str(),
                            created_at: &created_at,
                        })
                        .execute(conn)?;
                }
                Ok(created)
            })
        })
        .await
    }

    /// Move a link through the verification state machine.
    pub async fn update_verification_status(
        &self,
        link_id: i32,
        status: VerificationStatus,
    ) -> Result<(), diesel::result::Error> {
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            diesel::update(external_links::table.find(link_id))
                .set(external_links::verification_status.eq(status.as_str()))
                .execute(conn)?;
            Ok(())
        })
        .await
    }
}
