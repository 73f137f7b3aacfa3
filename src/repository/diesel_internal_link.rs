//! Internal link repository.
//!
//! Regeneration uses a scoped delete of the automatic subset followed by
//! insert-or-ignore, inside one transaction. Manual rows are never touched,
//! and the (source, target) uniqueness constraint absorbs duplicates.

use diesel::prelude::*;

use super::diesel_models::{InternalLinkRecord, NewInternalLink};
use super::diesel_pool::{run_blocking, SqlitePool};
use super::parse_datetime;
use crate::models::{AnchorType, InternalLink};
use crate::schema::internal_links;

impl From<InternalLinkRecord> for InternalLink {
    fn from(record: InternalLinkRecord) -> Self {
        InternalLink {
            id: record.id,
            source_article_id: record.source_article_id,
            target_article_id: record.target_article_id,
            anchor_text: record.anchor_text,
            anchor_type: AnchorType::from_str(&record.anchor_type).unwrap_or(AnchorType::Generic),
            relevance_score: record.relevance_score,
            is_automatic: record.is_automatic != 0,
            created_at: parse_datetime(&record.created_at),
        }
    }
}

/// Diesel-based internal link repository.
#[derive(Clone)]
pub struct InternalLinkRepository {
    pool: SqlitePool,
}

impl InternalLinkRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All link edges out of a source article.
    pub async fn for_source(
        &self,
        source_article_id: i32,
    ) -> Result<Vec<InternalLink>, diesel::result::Error> {
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            internal_links::table
                .filter(internal_links::source_article_id.eq(source_article_id))
                .order(internal_links::id.asc())
                .load::<InternalLinkRecord>(conn)
        })
        .await
        .map(|records| records.into_iter().map(InternalLink::from).collect())
    }

    /// Count link edges out of a source article.
    pub async fn count_for_source(
        &self,
        source_article_id: i32,
    ) -> Result<u64, diesel::result::Error> {
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            use diesel::dsl::count_star;
            let count: i64 = internal_links::table
                .filter(internal_links::source_article_id.eq(source_article_id))
                .select(count_star())
                .first(conn)?;
            Ok(count as u64)
        })
        .await
    }

    /// Insert a single edge, honoring the uniqueness constraint. A duplicate
    /// pair is a no-op. Used for manually curated links.
    pub async fn insert(&self, link: &InternalLink) -> Result<bool, diesel::result::Error> {
        let anchor_text = link.anchor_text.clone();
        let anchor_type = link.anchor_type.as_str();
        let source = link.source_article_id;
        let target = link.target_article_id;
        let relevance_score = link.relevance_score;
        let is_automatic = i32::from(link.is_automatic);
        let created_at = link.created_at.to_rfc3339();
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            let inserted = diesel::insert_or_ignore_into(internal_links::table)
                .values(NewInternalLink {
                    source_article_id: source,
                    target_article_id: target,
                    anchor_text: &anchor_text,
                    anchor_type,
                    relevance_score,
                    is_automatic,
                    created_at: &created_at,
                })
                .execute(conn)?;
            Ok(inserted > 0)
        })
        .await
    }

    /// Replace the automatic edge set for a source article.
    ///
    /// Deletes automatic rows for the source and inserts the new batch with
    /// insert-or-ignore, all inside one transaction so concurrent
    /// regenerations converge. Returns the number of rows actually inserted
    /// (pairs already covered by a manual row are skipped).
    pub async fn replace_automatic(
        &self,
        source_article_id: i32,
        links: Vec<InternalLink>,
    ) -> Result<usize, diesel::result::Error> {
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            conn.transaction::<_, diesel::result::Error, _>(|conn| {
                diesel::delete(
                    internal_links::table
                        .filter(internal_links::source_article_id.eq(source_article_id))
                        .filter(internal_links::is_automatic.eq(1)),
                )
                .execute(conn)?;

                let mut created = 0;
                for link in &links {
                    let created_at = link.created_at.to_rfc3339();
                    created += diesel::insert_or_ignore_into(internal_links::table)
                        .values(NewInternalLink {
                            source_article_id,
                            target_article_id: link.target_article_id,
                            anchor_text: &link.anchor_text,
                            anchor_type: link.anchor_type.as_str(),
                            relevance_score: link.relevance_score,
                            is_automatic: 1,
                            created_at: &created_at,
                        })
                        .execute(conn)?;
                }
                Ok(created)
            })
        })
        .await
    }
}
