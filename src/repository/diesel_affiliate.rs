//! Affiliate offer and association repository.
//!
//! Offers are admin-curated rows; the engine reads the active set for a
//! platform and records article↔offer associations. Association inserts are
//! insert-or-ignore on the (article, offer) pair so re-running injection
//! never duplicates.

use std::collections::HashMap;

use diesel::prelude::*;

use super::diesel_models::{
    AffiliateLinkRecord, ArticleAffiliateLinkRecord, NewAffiliateLink, NewArticleAffiliateLink,
};
use super::diesel_pool::{run_blocking, SqlitePool};
use super::{parse_datetime, parse_datetime_opt, parse_string_list};
use crate::models::{AffiliateLink, AffiliateStats, ArticleAffiliateLink, CommissionType};
use crate::schema::{affiliate_links, article_affiliate_links};

impl From<AffiliateLinkRecord> for AffiliateLink {
    fn from(record: AffiliateLinkRecord) -> Self {
        let custom_anchors: HashMap<String, Vec<String>> =
            serde_json::from_str(&record.custom_anchors).unwrap_or_default();
        AffiliateLink {
            id: record.id,
            platform_id: record.platform_id,
            service_name: record.service_name,
            service_slug: record.service_slug,
            tracking_url: record.tracking_url,
            commission_rate: record.commission_rate,
            commission_type: CommissionType::from_str(&record.commission_type)
                .unwrap_or(CommissionType::Percentage),
            country_codes: record.country_codes.as_deref().map(parse_string_list),
            language_codes: parse_string_list(&record.language_codes),
            themes: parse_string_list(&record.themes),
            custom_anchors,
            priority: record.priority,
            is_active: record.is_active != 0,
            starts_at: parse_datetime_opt(record.starts_at),
            expires_at: parse_datetime_opt(record.expires_at),
            created_at: parse_datetime(&record.created_at),
        }
    }
}

impl From<ArticleAffiliateLinkRecord> for ArticleAffiliateLink {
    fn from(record: ArticleAffiliateLinkRecord) -> Self {
        ArticleAffiliateLink {
            id: record.id,
            article_id: record.article_id,
            affiliate_link_id: record.affiliate_link_id,
            anchor_text: record.anchor_text,
            created_at: parse_datetime(&record.created_at),
        }
    }
}

/// Diesel-based affiliate repository.
#[derive(Clone)]
pub struct AffiliateLinkRepository {
    pool: SqlitePool,
}

impl AffiliateLinkRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register or update an offer (upsert on the unique service slug).
    pub async fn save(&self, offer: &AffiliateLink) -> Result<(), diesel::result::Error> {
        let service_name = offer.service_name.clone();
        let service_slug = offer.service_slug.clone();
        let tracking_url = offer.tracking_url.clone();
        let commission_type = offer.commission_type.as_str();
        let country_codes = offer
            .country_codes
            .as_ref()
            .map(|codes| serde_json::to_string(codes).unwrap_or_else(|_| "[]".to_string()));
        let language_codes =
            serde_json::to_string(&offer.language_codes).unwrap_or_else(|_| "[]".to_string());
        let themes = serde_json::to_string(&offer.themes).unwrap_or_else(|_| "[]".to_string());
        let custom_anchors =
            serde_json::to_string(&offer.custom_anchors).unwrap_or_else(|_| "{}".to_string());
        let starts_at = offer.starts_at.map(|dt| dt.to_rfc3339());
        let expires_at = offer.expires_at.map(|dt| dt.to_rfc3339());
        let created_at = offer.created_at.to_rfc3339();
        let platform_id = offer.platform_id;
        let commission_rate = offer.commission_rate;
        let priority = offer.priority;
        let is_active = i32::from(offer.is_active);
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            diesel::replace_into(affiliate_links::table)
                .values(NewAffiliateLink {
                    platform_id,
                    service_name: &service_name,
                    service_slug: &service_slug,
                    tracking_url: &tracking_url,
                    commission_rate,
                    commission_type,
                    country_codes: country_codes.as_deref(),
                    language_codes: &language_codes,
                    themes: &themes,
                    custom_anchors: &custom_anchors,
                    priority,
                    is_active,
                    starts_at: starts_at.as_deref(),
                    expires_at: expires_at.as_deref(),
                    created_at: &created_at,
                })
                .execute(conn)?;
            Ok(())
        })
        .await
    }

    /// Get an offer by id.
    pub async fn get(&self, id: i32) -> Result<Option<AffiliateLink>, diesel::result::Error> {
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            affiliate_links::table
                .find(id)
                .first::<AffiliateLinkRecord>(conn)
                .optional()
        })
        .await
        .map(|opt| opt.map(AffiliateLink::from))
    }

    /// Active offers for a platform. Temporal windows are evaluated by the
    /// caller at selection time, not here.
    pub async fn active_for_platform(
        &self,
        platform_id: i32,
    ) -> Result<Vec<AffiliateLink>, diesel::result::Error> {
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            affiliate_links::table
                .filter(affiliate_links::platform_id.eq(platform_id))
                .filter(affiliate_links::is_active.eq(1))
                .order(affiliate_links::priority.desc())
                .load::<AffiliateLinkRecord>(conn)
        })
        .await
        .map(|records| records.into_iter().map(AffiliateLink::from).collect())
    }

    /// Record an article↔offer association. Returns false if the pair
    /// already existed.
    pub async fn insert_association_if_absent(
        &self,
        article_id: i32,
        affiliate_link_id: i32,
        anchor_text: &str,
    ) -> Result<bool, diesel::result::Error> {
        let anchor_text = anchor_text.to_string();
        let created_at = chrono::Utc::now().to_rfc3339();
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            let inserted = diesel::insert_or_ignore_into(article_affiliate_links::table)
                .values(NewArticleAffiliateLink {
                    article_id,
                    affiliate_link_id,
                    anchor_text: &anchor_text,
                    created_at: &created_at,
                })
                .execute(conn)?;
            Ok(inserted > 0)
        })
        .await
    }

    /// Associations recorded for an article, in insertion order.
    pub async fn associations_for_article(
        &self,
        article_id: i32,
    ) -> Result<Vec<ArticleAffiliateLink>, diesel::result::Error> {
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            article_affiliate_links::table
                .filter(article_affiliate_links::article_id.eq(article_id))
                .order(article_affiliate_links::id.asc())
                .load::<ArticleAffiliateLinkRecord>(conn)
        })
        .await
        .map(|records| {
            records
                .into_iter()
                .map(ArticleAffiliateLink::from)
                .collect()
        })
    }

    /// Read-only aggregate over a platform's offers and insertions.
    pub async fn stats(&self, platform_id: i32) -> Result<AffiliateStats, diesel::result::Error> {
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            use diesel::dsl::count_star;

            let total_links: i64 = affiliate_links::table
                .filter(affiliate_links::platform_id.eq(platform_id))
                .select(count_star())
                .first(conn)?;

            let active_links: i64 = affiliate_links::table
                .filter(affiliate_links::platform_id.eq(platform_id))
                .filter(affiliate_links::is_active.eq(1))
                .select(count_star())
                .first(conn)?;

            let total_insertions: i64 = article_affiliate_links::table
                .inner_join(affiliate_links::table)
                .filter(affiliate_links::platform_id.eq(platform_id))
                .select(count_star())
                .first(conn)?;

            let average_commission: Option<f64> = affiliate_links::table
                .filter(affiliate_links::platform_id.eq(platform_id))
                .select(diesel::dsl::avg(affiliate_links::commission_rate))
                .first(conn)?;

            Ok(AffiliateStats {
                total_links: total_links as u64,
                active_links: active_links as u64,
                total_insertions: total_insertions as u64,
                average_commission: average_commission.unwrap_or(0.0),
            })
        })
        .await
    }
}
