//! Affiliate service behavior: offer matching, temporal windows, anchor
//! selection, idempotent association and content injection.

mod common;

use std::collections::HashMap;

use chrono::{Duration, Utc};
use linkweaver::config::LinkingConfig;
use linkweaver::models::{AffiliateLink, CommissionType};
use linkweaver::repository::AffiliateLinkRepository;
use linkweaver::services::AffiliateLinkService;

use common::{french_visa_article, setup_test_db, three_paragraph_content};

fn offer(slug: &str) -> AffiliateLink {
    AffiliateLink {
        id: 0,
        platform_id: 1,
        service_name: "Assurance Visa Plus".to_string(),
        service_slug: slug.to_string(),
        tracking_url: format!("https://go.example.com/{slug}"),
        commission_rate: 12.0,
        commission_type: CommissionType::Percentage,
        country_codes: Some(vec!["FR".to_string()]),
        language_codes: vec!["fr".to_string()],
        themes: vec!["visa".to_string()],
        custom_anchors: HashMap::new(),
        priority: 5,
        is_active: true,
        starts_at: None,
        expires_at: None,
        created_at: Utc::now(),
    }
}

fn service(pool: linkweaver::repository::SqlitePool) -> AffiliateLinkService {
    AffiliateLinkService::new(AffiliateLinkRepository::new(pool), LinkingConfig::default())
        .expect("valid default config")
}

// ============================================================================
// Offer selection
// ============================================================================

#[tokio::test]
async fn matching_offer_is_associated() {
    let (pool, _dir) = setup_test_db().await;
    let offers = AffiliateLinkRepository::new(pool.clone());
    offers.save(&offer("visa-plus")).await.unwrap();

    let article = french_visa_article(1);
    let svc = service(pool);
    let outcome = svc.inject_affiliate_links(&article).await.unwrap();

    assert_eq!(outcome.injected, 1);
    let associations = offers.associations_for_article(article.id).await.unwrap();
    assert_eq!(associations.len(), 1);
}

#[tokio::test]
async fn rerunning_injection_never_duplicates() {
    let (pool, _dir) = setup_test_db().await;
    let offers = AffiliateLinkRepository::new(pool.clone());
    offers.save(&offer("visa-plus")).await.unwrap();

    let article = french_visa_article(1);
    let svc = service(pool);
    let first = svc.inject_affiliate_links(&article).await.unwrap();
    let second = svc.inject_affiliate_links(&article).await.unwrap();

    assert_eq!(first.injected, 1);
    assert_eq!(second.injected, 0, "association already recorded");
    assert_eq!(
        offers.associations_for_article(article.id).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn expired_and_future_offers_are_excluded() {
    let (pool, _dir) = setup_test_db().await;
    let offers = AffiliateLinkRepository::new(pool.clone());

    let mut expired = offer("expired");
    expired.expires_at = Some(Utc::now() - Duration::days(2));
    offers.save(&expired).await.unwrap();

    let mut upcoming = offer("upcoming");
    upcoming.starts_at = Some(Utc::now() + Duration::days(2));
    offers.save(&upcoming).await.unwrap();

    let mut live = offer("live");
    live.starts_at = Some(Utc::now() - Duration::days(1));
    live.expires_at = Some(Utc::now() + Duration::days(1));
    offers.save(&live).await.unwrap();

    let article = french_visa_article(1);
    let svc = service(pool);
    let outcome = svc.inject_affiliate_links(&article).await.unwrap();

    assert_eq!(outcome.injected, 1, "only the live offer qualifies");
}

#[tokio::test]
async fn scope_filters_exclude_mismatched_offers() {
    let (pool, _dir) = setup_test_db().await;
    let offers = AffiliateLinkRepository::new(pool.clone());

    let mut wrong_country = offer("wrong-country");
    wrong_country.country_codes = Some(vec!["DE".to_string()]);
    offers.save(&wrong_country).await.unwrap();

    let mut wrong_language = offer("wrong-language");
    wrong_language.language_codes = vec!["en".to_string()];
    offers.save(&wrong_language).await.unwrap();

    let mut wrong_theme = offer("wrong-theme");
    wrong_theme.themes = vec!["banking".to_string()];
    offers.save(&wrong_theme).await.unwrap();

    let mut inactive = offer("inactive");
    inactive.is_active = false;
    offers.save(&inactive).await.unwrap();

    let article = french_visa_article(1);
    let svc = service(pool);
    let outcome = svc.inject_affiliate_links(&article).await.unwrap();

    assert_eq!(outcome.injected, 0);
}

#[tokio::test]
async fn higher_commission_and_priority_win_the_cap() {
    let (pool, _dir) = setup_test_db().await;
    let offers = AffiliateLinkRepository::new(pool.clone());

    let mut weak = offer("weak");
    weak.commission_rate = 3.0;
    weak.priority = 1;
    offers.save(&weak).await.unwrap();

    let mut strong = offer("strong");
    strong.commission_rate = 25.0;
    strong.priority = 9;
    offers.save(&strong).await.unwrap();

    let article = french_visa_article(1);
    let mut config = LinkingConfig::default();
    config.affiliate.max_per_article = 1;
    let svc =
        AffiliateLinkService::new(AffiliateLinkRepository::new(pool), config).unwrap();
    svc.inject_affiliate_links(&article).await.unwrap();

    let associations = offers.associations_for_article(article.id).await.unwrap();
    assert_eq!(associations.len(), 1);
    let selected = offers
        .get(associations[0].affiliate_link_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(selected.service_slug, "strong");
}

// ============================================================================
// Anchors
// ============================================================================

#[tokio::test]
async fn curated_anchors_take_precedence() {
    let (pool, _dir) = setup_test_db().await;
    let offers = AffiliateLinkRepository::new(pool.clone());

    let mut curated = offer("curated");
    curated.custom_anchors.insert(
        "fr".to_string(),
        vec!["souscrire une assurance visa".to_string()],
    );
    offers.save(&curated).await.unwrap();

    let article = french_visa_article(1);
    let svc = service(pool);
    svc.inject_affiliate_links(&article).await.unwrap();

    let associations = offers.associations_for_article(article.id).await.unwrap();
    assert_eq!(associations[0].anchor_text, "souscrire une assurance visa");
}

#[tokio::test]
async fn fallback_anchor_is_a_localized_cta() {
    let (pool, _dir) = setup_test_db().await;
    let offers = AffiliateLinkRepository::new(pool.clone());
    offers.save(&offer("visa-plus")).await.unwrap();

    let article = french_visa_article(1);
    let svc = service(pool);
    svc.inject_affiliate_links(&article).await.unwrap();

    let associations = offers.associations_for_article(article.id).await.unwrap();
    assert!(
        associations[0].anchor_text.contains("Assurance Visa Plus"),
        "CTA must carry the service name: {}",
        associations[0].anchor_text
    );
}

// ============================================================================
// Content injection
// ============================================================================

#[tokio::test]
async fn injected_content_carries_sponsored_markers() {
    let (pool, _dir) = setup_test_db().await;
    let offers = AffiliateLinkRepository::new(pool.clone());
    offers.save(&offer("visa-plus")).await.unwrap();

    let article = french_visa_article(1);
    let svc = service(pool);
    svc.inject_affiliate_links(&article).await.unwrap();

    let html = svc
        .insert_links_in_content(&three_paragraph_content(), &article)
        .await
        .unwrap();

    assert!(html.contains("https://go.example.com/visa-plus"));
    assert!(html.contains("rel=\"sponsored noopener\""));
    assert!(html.contains("class=\"affiliate-link\""));
}

#[tokio::test]
async fn sponsored_attribute_can_be_disabled() {
    let (pool, _dir) = setup_test_db().await;
    let offers = AffiliateLinkRepository::new(pool.clone());
    offers.save(&offer("visa-plus")).await.unwrap();

    let article = french_visa_article(1);
    let mut config = LinkingConfig::default();
    config.affiliate.sponsored_attribute = false;
    let svc =
        AffiliateLinkService::new(AffiliateLinkRepository::new(pool), config).unwrap();

    svc.inject_affiliate_links(&article).await.unwrap();
    let html = svc
        .insert_links_in_content(&three_paragraph_content(), &article)
        .await
        .unwrap();

    assert!(!html.contains("rel=\"sponsored"));
    assert!(html.contains("class=\"affiliate-link\""));
}

#[tokio::test]
async fn content_without_eligible_zones_is_returned_unchanged() {
    let (pool, _dir) = setup_test_db().await;
    let offers = AffiliateLinkRepository::new(pool.clone());
    offers.save(&offer("visa-plus")).await.unwrap();

    let article = french_visa_article(1);
    let svc = service(pool);
    svc.inject_affiliate_links(&article).await.unwrap();

    let short = "<p>trop court</p>";
    let html = svc.insert_links_in_content(short, &article).await.unwrap();
    assert_eq!(html, short);
}

// ============================================================================
// Stats
// ============================================================================

#[tokio::test]
async fn stats_aggregate_platform_state() {
    let (pool, _dir) = setup_test_db().await;
    let offers = AffiliateLinkRepository::new(pool.clone());

    let mut first = offer("first");
    first.commission_rate = 10.0;
    offers.save(&first).await.unwrap();

    let mut second = offer("second");
    second.commission_rate = 20.0;
    second.is_active = false;
    offers.save(&second).await.unwrap();

    let article = french_visa_article(1);
    let svc = service(pool);
    svc.inject_affiliate_links(&article).await.unwrap();

    let stats = svc.get_affiliate_stats(1).await.unwrap();
    assert_eq!(stats.total_links, 2);
    assert_eq!(stats.active_links, 1);
    assert_eq!(stats.total_insertions, 1);
    assert!((stats.average_commission - 15.0).abs() < 1e-9);
}
