//! Shared test fixtures: temp-database setup and article builders.

#![allow(dead_code)]

use std::sync::Once;

use diesel::prelude::*;

use linkweaver::models::Article;
use linkweaver::repository::{create_pool_from_url, run_blocking, SqlitePool};

static TRACING: Once = Once::new();

/// Route engine logs through the test harness when RUST_LOG is set.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY,
        platform_id INTEGER NOT NULL,
        country_code TEXT,
        language_code TEXT NOT NULL,
        theme TEXT,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        status TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS internal_links (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        source_article_id INTEGER NOT NULL,
        target_article_id INTEGER NOT NULL,
        anchor_text TEXT NOT NULL,
        anchor_type TEXT NOT NULL,
        relevance_score REAL NOT NULL,
        is_automatic INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        UNIQUE(source_article_id, target_article_id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS external_links (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        article_id INTEGER NOT NULL,
        url TEXT NOT NULL,
        domain TEXT NOT NULL,
        anchor_text TEXT NOT NULL,
        source_type TEXT NOT NULL,
        is_automatic INTEGER NOT NULL,
        verification_status TEXT NOT NULL,
        created_at TEXT NOT NULL,
        UNIQUE(article_id, url)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS authority_domains (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        domain TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        source_type TEXT NOT NULL,
        country_code TEXT,
        languages TEXT NOT NULL DEFAULT '[]',
        topics TEXT NOT NULL DEFAULT '[]',
        authority_score REAL NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1
    )"#,
    r#"CREATE TABLE IF NOT EXISTS affiliate_links (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        platform_id INTEGER NOT NULL,
        service_name TEXT NOT NULL,
        service_slug TEXT NOT NULL UNIQUE,
        tracking_url TEXT NOT NULL,
        commission_rate REAL NOT NULL,
        commission_type TEXT NOT NULL,
        country_codes TEXT,
        language_codes TEXT NOT NULL DEFAULT '[]',
        themes TEXT NOT NULL DEFAULT '[]',
        custom_anchors TEXT NOT NULL DEFAULT '{}',
        priority INTEGER NOT NULL DEFAULT 0,
        is_active INTEGER NOT NULL DEFAULT 1,
        starts_at TEXT,
        expires_at TEXT,
        created_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS article_affiliate_links (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        article_id INTEGER NOT NULL,
        affiliate_link_id INTEGER NOT NULL,
        anchor_text TEXT NOT NULL,
        created_at TEXT NOT NULL,
        UNIQUE(article_id, affiliate_link_id)
    )"#,
];

/// Create a temporary SQLite database with the engine schema applied.
pub async fn setup_test_db() -> (SqlitePool, tempfile::TempDir) {
    init_tracing();
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let pool = create_pool_from_url(&db_path.display().to_string()).expect("Failed to build pool");

    run_blocking(pool.clone(), |conn| {
        for statement in SCHEMA {
            diesel::sql_query(*statement).execute(conn)?;
        }
        Ok(())
    })
    .await
    .expect("Failed to apply schema");

    (pool, dir)
}

/// A paragraph of `words` filler words, wrapped in `<p>` tags.
pub fn paragraph(words: usize) -> String {
    let body = (0..words)
        .map(|i| format!("mot{i}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!("<p>{body}</p>")
}

/// Three long link-eligible paragraphs.
pub fn three_paragraph_content() -> String {
    format!("{}{}{}", paragraph(40), paragraph(40), paragraph(40))
}

/// A published French article about visas in France.
pub fn french_visa_article(id: i32) -> Article {
    Article::new(
        id,
        1,
        Some("FR".to_string()),
        "fr".to_string(),
        Some("visa".to_string()),
        format!("Visa et démarches administratives {id}"),
        three_paragraph_content(),
    )
}
