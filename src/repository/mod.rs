//! Diesel/SQLite repositories for the link graph.
//!
//! diesel-async has no SQLite backend, so all operations run sync Diesel
//! wrapped in `spawn_blocking` (see [`diesel_pool::run_blocking`]). Each
//! repository is `Clone` over the shared r2d2 pool.

pub mod diesel_affiliate;
pub mod diesel_article;
pub mod diesel_authority;
pub mod diesel_external_link;
pub mod diesel_internal_link;
pub mod diesel_models;
pub mod diesel_pool;

pub use diesel_affiliate::AffiliateLinkRepository;
pub use diesel_article::ArticleRepository;
pub use diesel_authority::AuthorityDomainRepository;
pub use diesel_external_link::ExternalLinkRepository;
pub use diesel_internal_link::InternalLinkRepository;
pub use diesel_pool::{create_pool, create_pool_from_url, run_blocking, SqlitePool};

use chrono::{DateTime, Utc};

/// Parse an RFC 3339 timestamp column, falling back to now on corrupt data.
pub(crate) fn parse_datetime(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Parse an optional RFC 3339 timestamp column.
pub(crate) fn parse_datetime_opt(raw: Option<String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    })
}

/// Decode a JSON string-array column. Corrupt data reads as empty.
pub(crate) fn parse_string_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}
