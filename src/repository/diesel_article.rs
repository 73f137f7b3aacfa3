//! Article repository.
//!
//! The engine reads articles and writes back injected content; everything
//! else about an article belongs to the authoring pipeline.

use diesel::prelude::*;

use super::diesel_models::{ArticleRecord, NewArticle};
use super::diesel_pool::{run_blocking, SqlitePool};
use super::parse_datetime;
use crate::models::{Article, ArticleStatus};
use crate::schema::articles;

impl From<ArticleRecord> for Article {
    fn from(record: ArticleRecord) -> Self {
        Article {
            id: record.id,
            platform_id: record.platform_id,
            country_code: record.country_code,
            language_code: record.language_code,
            theme: record.theme,
            title: record.title,
            content: record.content,
            status: ArticleStatus::from_str(&record.status).unwrap_or(ArticleStatus::Draft),
            created_at: parse_datetime(&record.created_at),
            updated_at: parse_datetime(&record.updated_at),
        }
    }
}

/// Diesel-based article repository.
#[derive(Clone)]
pub struct ArticleRepository {
    pool: SqlitePool,
}

impl ArticleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get an article by id.
    pub async fn get(&self, id: i32) -> Result<Option<Article>, diesel::result::Error> {
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            articles::table
                .find(id)
                .first::<ArticleRecord>(conn)
                .optional()
        })
        .await
        .map(|opt| opt.map(Article::from))
    }

    /// Published articles in the given language, excluding one id.
    ///
    /// This is the internal-linking candidate query: language is a hard
    /// filter, the exclusion keeps an article from linking to itself.
    pub async fn published_in_language(
        &self,
        language_code: &str,
        exclude_id: i32,
    ) -> Result<Vec<Article>, diesel::result::Error> {
        let language = language_code.to_string();
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            articles::table
                .filter(articles::language_code.eq(&language))
                .filter(articles::status.eq(ArticleStatus::Published.as_str()))
                .filter(articles::id.ne(exclude_id))
                .order(articles::id.asc())
                .load::<ArticleRecord>(conn)
        })
        .await
        .map(|records| records.into_iter().map(Article::from).collect())
    }

    /// Save an article (insert or update). Used by seed tooling and tests.
    pub async fn save(&self, article: &Article) -> Result<(), diesel::result::Error> {
        let created_at = article.created_at.to_rfc3339();
        let updated_at = article.updated_at.to_rfc3339();

        let id = article.id;
        let platform_id = article.platform_id;
        let country_code = article.country_code.clone();
        let language_code = article.language_code.clone();
        let theme = article.theme.clone();
        let title = article.title.clone();
        let content = article.content.clone();
        let status = article.status.as_str();
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            let record = NewArticle {
                id,
                platform_id,
                country_code: country_code.as_deref(),
                language_code: &language_code,
                theme: theme.as_deref(),
                title: &title,
                content: &content,
                status,
                created_at: &created_at,
                updated_at: &updated_at,
            };
            diesel::replace_into(articles::table)
                .values(&record)
                .execute(conn)?;
            Ok(())
        })
        .await
    }

    /// Write back rewritten content after anchor injection.
    pub async fn update_content(
        &self,
        id: i32,
        content: &str,
    ) -> Result<(), diesel::result::Error> {
        let content = content.to_string();
        let updated_at = chrono::Utc::now().to_rfc3339();
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            diesel::update(articles::table.find(id))
                .set((
                    articles::content.eq(&content),
                    articles::updated_at.eq(&updated_at),
                ))
                .execute(conn)?;
            Ok(())
        })
        .await
    }
}
