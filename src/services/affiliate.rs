//! Affiliate linking: monetizable offers matched to articles.
//!
//! Selection evaluates the offer's country/language/theme scope and its
//! temporal window at call time — expired offers stay in the store and are
//! simply never selected.

use chrono::Utc;
use tracing::{debug, info};

use crate::config::LinkingConfig;
use crate::content::{analyze, anchor_markup, inject_anchors, Insertion};
use crate::distribution::calculate_uniform_distribution;
use crate::error::Result;
use crate::locale;
use crate::models::{AffiliateLink, AffiliateStats, AnchorType, Article};
use crate::repository::AffiliateLinkRepository;
use crate::scoring::rank_candidates;

/// Result of one affiliate injection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateOutcome {
    /// New associations recorded; re-running injection never duplicates.
    pub injected: usize,
}

/// Matches offers to articles and injects affiliate anchors.
pub struct AffiliateLinkService {
    offers: AffiliateLinkRepository,
    config: LinkingConfig,
}

impl AffiliateLinkService {
    /// Build the service, failing fast on invalid configuration.
    pub fn new(offers: AffiliateLinkRepository, config: LinkingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { offers, config })
    }

    /// Select matching offers for an article and persist the associations.
    pub async fn inject_affiliate_links(&self, article: &Article) -> Result<AffiliateOutcome> {
        let now = Utc::now();
        let offers = self.offers.active_for_platform(article.platform_id).await?;
        let eligible: Vec<AffiliateLink> = offers
            .into_iter()
            .filter(|offer| offer.matches_article(article, now))
            .collect();

        if eligible.is_empty() {
            debug!(article_id = article.id, "no matching affiliate offers");
            return Ok(AffiliateOutcome { injected: 0 });
        }

        let weights = self.config.affiliate.weights.clone();
        let weight_total = weights.commission + weights.priority + weights.relevance;
        let ranked = rank_candidates(
            eligible,
            |offer| {
                let commission = (offer.commission_rate / 100.0).clamp(0.0, 1.0);
                let priority = (offer.priority as f64 / 10.0).clamp(0.0, 1.0);
                let relevance = offer.theme_relevance(article.theme.as_deref());

                let raw = weights.commission * commission
                    + weights.priority * priority
                    + weights.relevance * relevance;
                (raw / weight_total * 100.0).clamp(0.0, 100.0)
            },
            self.config.affiliate.max_per_article,
        );

        let mut injected = 0;
        for (i, scored) in ranked.iter().enumerate() {
            let anchor = self.anchor_for(&scored.item, article, i);
            let inserted = self
                .offers
                .insert_association_if_absent(article.id, scored.item.id, &anchor)
                .await?;
            if inserted {
                injected += 1;
            }
        }

        info!(article_id = article.id, injected, "affiliate offers associated");
        Ok(AffiliateOutcome { injected })
    }

    /// Pick the anchor for an offer: curated per-language anchors first
    /// (rotated so a batch doesn't repeat), localized CTA otherwise.
    fn anchor_for(&self, offer: &AffiliateLink, article: &Article, index: usize) -> String {
        let language = locale::normalize_language(&article.language_code);
        if let Some(anchors) = offer.custom_anchors.get(&language) {
            if !anchors.is_empty() {
                return anchors[index % anchors.len()].clone();
            }
        }
        locale::generate_localized_anchor(
            &offer.service_name,
            &article.language_code,
            AnchorType::Cta,
        )
    }

    /// Inject the article's recorded offers into a content string.
    ///
    /// Placement uses the distribution engine over link-free eligible
    /// zones; each anchor carries the `affiliate-link` class and, when
    /// configured, `rel="sponsored"`. Returns the rewritten HTML — the
    /// caller owns persisting it.
    pub async fn insert_links_in_content(
        &self,
        content: &str,
        article: &Article,
    ) -> Result<String> {
        let associations = self.offers.associations_for_article(article.id).await?;
        if associations.is_empty() {
            return Ok(content.to_string());
        }

        let structure = analyze(content);
        let zones = structure.placement_zones(self.config.min_paragraph_words());
        if zones.is_empty() {
            debug!(article_id = article.id, "no eligible zones; content unchanged");
            return Ok(content.to_string());
        }

        let placements = calculate_uniform_distribution(
            associations.len(),
            &zones,
            self.config.affiliate.max_per_paragraph,
        )?;

        let rel = self
            .config
            .affiliate
            .sponsored_attribute
            .then_some("sponsored noopener");

        let mut insertions = Vec::new();
        for (association, placement) in associations.iter().zip(&placements) {
            let Some(offer) = self.offers.get(association.affiliate_link_id).await? else {
                continue;
            };
            insertions.push(Insertion {
                position: placement.zone_end,
                markup: anchor_markup(
                    &offer.tracking_url,
                    &association.anchor_text,
                    rel,
                    Some("affiliate-link"),
                ),
            });
        }

        Ok(inject_anchors(content, &insertions))
    }

    /// Read-only aggregate over a platform's affiliate state.
    pub async fn get_affiliate_stats(&self, platform_id: i32) -> Result<AffiliateStats> {
        Ok(self.offers.stats(platform_id).await?)
    }
}
