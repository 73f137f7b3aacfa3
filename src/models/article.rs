//! Article domain model.
//!
//! Articles are owned by the authoring pipeline. The engine reads them to
//! pick link candidates and writes back `content` after anchor injection;
//! everything else is immutable from this crate's perspective.

use chrono::{DateTime, Utc};

/// Publication status of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleStatus {
    Draft,
    Published,
    Archived,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Published => "published",
            ArticleStatus::Archived => "archived",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ArticleStatus::Draft),
            "published" => Some(ArticleStatus::Published),
            "archived" => Some(ArticleStatus::Archived),
            _ => None,
        }
    }
}

/// An article as seen by the linking engine.
#[derive(Debug, Clone)]
pub struct Article {
    pub id: i32,
    pub platform_id: i32,
    /// ISO country code; `None` for articles without a geographic scope.
    pub country_code: Option<String>,
    /// ISO 639-1 language code, already normalized by the authoring pipeline.
    pub language_code: String,
    pub theme: Option<String>,
    pub title: String,
    /// HTML body. Rewritten in place when anchors are injected.
    pub content: String,
    pub status: ArticleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Build a published article. Mainly used by tests and seed tooling;
    /// production articles come out of the store.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i32,
        platform_id: i32,
        country_code: Option<String>,
        language_code: String,
        theme: Option<String>,
        title: String,
        content: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            platform_id,
            country_code,
            language_code,
            theme,
            title,
            content,
            status: ArticleStatus::Published,
            created_at: now,
            updated_at: now,
        }
    }
}
