//! Authority domain registry repository.
//!
//! Language and topic sets are JSON arrays in TEXT columns; scope filtering
//! happens in Rust after loading the active set, which stays small (a
//! registry is curated, not crawled).

use diesel::prelude::*;

use super::diesel_models::{AuthorityDomainRecord, NewAuthorityDomain};
use super::diesel_pool::{run_blocking, SqlitePool};
use super::parse_string_list;
use crate::models::{AuthorityDomain, AuthoritySourceType};
use crate::schema::authority_domains;

impl From<AuthorityDomainRecord> for AuthorityDomain {
    fn from(record: AuthorityDomainRecord) -> Self {
        AuthorityDomain {
            id: record.id,
            domain: record.domain,
            name: record.name,
            source_type: AuthoritySourceType::from_str(&record.source_type)
                .unwrap_or(AuthoritySourceType::Custom),
            country_code: record.country_code,
            languages: parse_string_list(&record.languages),
            topics: parse_string_list(&record.topics),
            authority_score: record.authority_score,
            is_active: record.is_active != 0,
        }
    }
}

/// Diesel-based authority domain repository.
#[derive(Clone)]
pub struct AuthorityDomainRepository {
    pool: SqlitePool,
}

impl AuthorityDomainRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register or update a domain (upsert on the unique domain name).
    pub async fn save(&self, entry: &AuthorityDomain) -> Result<(), diesel::result::Error> {
        let domain = entry.domain.clone();
        let name = entry.name.clone();
        let source_type = entry.source_type.as_str();
        let country_code = entry.country_code.clone();
        let languages =
            serde_json::to_string(&entry.languages).unwrap_or_else(|_| "[]".to_string());
        let topics = serde_json::to_string(&entry.topics).unwrap_or_else(|_| "[]".to_string());
        let authority_score = entry.authority_score;
        let is_active = i32::from(entry.is_active);
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            diesel::replace_into(authority_domains::table)
                .values(NewAuthorityDomain {
                    domain: &domain,
                    name: &name,
                    source_type,
                    country_code: country_code.as_deref(),
                    languages: &languages,
                    topics: &topics,
                    authority_score,
                    is_active,
                })
                .execute(conn)?;
            Ok(())
        })
        .await
    }

    /// All active registry entries.
    pub async fn active(&self) -> Result<Vec<AuthorityDomain>, diesel::result::Error> {
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            authority_domains::table
                .filter(authority_domains::is_active.eq(1))
                .order(authority_domains::authority_score.desc())
                .load::<AuthorityDomainRecord>(conn)
        })
        .await
        .map(|records| records.into_iter().map(AuthorityDomain::from).collect())
    }

    /// Active entries matching an article's country/language scope.
    /// Global entries (no country) always qualify.
    pub async fn active_for_scope(
        &self,
        country_code: Option<&str>,
        language_code: &str,
    ) -> Result<Vec<AuthorityDomain>, diesel::result::Error> {
        let all = self.active().await?;
        let language = language_code.to_string();
        Ok(all
            .into_iter()
            .filter(|d| d.matches_scope(country_code, &language))
            .collect())
    }
}
