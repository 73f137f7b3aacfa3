//! Diesel ORM models for the link graph tables.
//!
//! Records map 1:1 onto columns; conversion to domain models happens in the
//! repository modules so JSON columns and enums decode in one place.

use diesel::prelude::*;

use crate::schema;

/// Article record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::articles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ArticleRecord {
    pub id: i32,
    pub platform_id: i32,
    pub country_code: Option<String>,
    pub language_code: String,
    pub theme: Option<String>,
    pub title: String,
    pub content: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// New article for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::articles)]
pub struct NewArticle<'a> {
    pub id: i32,
    pub platform_id: i32,
    pub country_code: Option<&'a str>,
    pub language_code: &'a str,
    pub theme: Option<&'a str>,
    pub title: &'a str,
    pub content: &'a str,
    pub status: &'a str,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}

/// Internal link record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::internal_links)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InternalLinkRecord {
    pub id: i32,
    pub source_article_id: i32,
    pub target_article_id: i32,
    pub anchor_text: String,
    pub anchor_type: String,
    pub relevance_score: f64,
    pub is_automatic: i32,
    pub created_at: String,
}

/// New internal link for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::internal_links)]
pub struct NewInternalLink<'a> {
    pub source_article_id: i32,
    pub target_article_id: i32,
    pub anchor_text: &'a str,
    pub anchor_type: &'a str,
    pub relevance_score: f64,
    pub is_automatic: i32,
    pub created_at: &'a str,
}

/// External link record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::external_links)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExternalLinkRecord {
    pub id: i32,
    pub article_id: i32,
    pub url: String,
    pub domain: String,
    pub anchor_text: String,
    pub source_type: String,
    pub is_automatic: i32,
    pub verification_status: String,
    pub created_at: String,
}

/// New external link for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::external_links)]
pub struct NewExternalLink<'a> {
    pub article_id: i32,
    pub url: &'a str,
    pub domain: &'a str,
    pub anchor_text: &'a str,
    pub source_type: &'a str,
    pub is_automatic: i32,
    pub verification_status: &'a str,
    pub created_at: &'a str,
}

/// Authority domain record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::authority_domains)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuthorityDomainRecord {
    pub id: i32,
    pub domain: String,
    pub name: String,
    pub source_type: String,
    pub country_code: Option<String>,
    pub languages: String,
    pub topics: String,
    pub authority_score: f64,
    pub is_active: i32,
}

/// New authority domain for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::authority_domains)]
pub struct NewAuthorityDomain<'a> {
    pub domain: &'a str,
    pub name: &'a str,
    pub source_type: &'a str,
    pub country_code: Option<&'a str>,
    pub languages: &'a str,
    pub topics: &'a str,
    pub authority_score: f64,
    pub is_active: i32,
}

/// Affiliate offer record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::affiliate_links)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AffiliateLinkRecord {
    pub id: i32,
    pub platform_id: i32,
    pub service_name: String,
    pub service_slug: String,
    pub tracking_url: String,
    pub commission_rate: f64,
    pub commission_type: String,
    pub country_codes: Option<String>,
    pub language_codes: String,
    pub themes: String,
    pub custom_anchors: String,
    pub priority: i32,
    pub is_active: i32,
    pub starts_at: Option<String>,
    pub expires_at: Option<String>,
    pub created_at: String,
}

/// New affiliate offer for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::affiliate_links)]
pub struct NewAffiliateLink<'a> {
    pub platform_id: i32,
    pub service_name: &'a str,
    pub service_slug: &'a str,
    pub tracking_url: &'a str,
    pub commission_rate: f64,
    pub commission_type: &'a str,
    pub country_codes: Option<&'a str>,
    pub language_codes: &'a str,
    pub themes: &'a str,
    pub custom_anchors: &'a str,
    pub priority: i32,
    pub is_active: i32,
    pub starts_at: Option<&'a str>,
    pub expires_at: Option<&'a str>,
    pub created_at: &'a str,
}

/// Article↔offer association record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::article_affiliate_links)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ArticleAffiliateLinkRecord {
    pub id: i32,
    pub article_id: i32,
    pub affiliate_link_id: i32,
    pub anchor_text: String,
    pub created_at: String,
}

/// New article↔offer association for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::article_affiliate_links)]
pub struct NewArticleAffiliateLink<'a> {
    pub article_id: i32,
    pub affiliate_link_id: i32,
    pub anchor_text: &'a str,
    pub created_at: &'a str,
}
