//! External linking: outbound links to authoritative sources.
//!
//! Candidates come from two places: an injected discovery provider (the
//! only network-bound collaborator, treated as zero candidates on failure)
//! and the curated authority domain registry.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::LinkingConfig;
use crate::content::{analyze, anchor_markup, inject_anchors, Insertion};
use crate::distribution::calculate_uniform_distribution;
use crate::error::Result;
use crate::locale;
use crate::models::{Article, AuthoritySourceType, ExternalLink, VerificationStatus};
use crate::repository::{ArticleRepository, AuthorityDomainRepository, ExternalLinkRepository};
use crate::scoring::rank_candidates;

/// An external URL candidate, from discovery or the registry.
#[derive(Debug, Clone)]
pub struct DiscoveredLink {
    pub url: String,
    pub title: String,
    /// May be left empty by discovery providers; derived from `url` then.
    pub domain: String,
    pub source_type: AuthoritySourceType,
    /// Trust score, 0–100.
    pub authority_score: f64,
}

impl DiscoveredLink {
    /// The candidate's domain, derived from the URL when the provider
    /// didn't fill it in.
    fn effective_domain(&self) -> Option<String> {
        if !self.domain.is_empty() {
            return Some(self.domain.clone());
        }
        url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }
}

/// Finds external URL candidates for an article. Network-bound and owned
/// by the caller; a failure here degrades to an empty candidate set.
#[async_trait]
pub trait DiscoveryProvider: Send + Sync {
    async fn discover_links(&self, article: &Article) -> anyhow::Result<Vec<DiscoveredLink>>;
}

/// Checks whether a URL is alive. Owned by the caller; the engine only
/// drives the pending → verified | broken state machine.
#[async_trait]
pub trait VerificationProvider: Send + Sync {
    async fn check(&self, url: &str) -> anyhow::Result<bool>;
}

/// Result of one external link generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLinkOutcome {
    pub created: usize,
}

/// Result of a verification pass over an article's external links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub total: usize,
    pub verified: usize,
}

/// Generates and verifies the external link set for an article.
pub struct ExternalLinkingService {
    articles: ArticleRepository,
    links: ExternalLinkRepository,
    registry: AuthorityDomainRepository,
    discovery: Arc<dyn DiscoveryProvider>,
    config: LinkingConfig,
}

impl ExternalLinkingService {
    /// Build the service, failing fast on invalid configuration.
    pub fn new(
        articles: ArticleRepository,
        links: ExternalLinkRepository,
        registry: AuthorityDomainRepository,
        discovery: Arc<dyn DiscoveryProvider>,
        config: LinkingConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            articles,
            links,
            registry,
            discovery,
            config,
        })
    }

    /// Regenerate the automatic external links of an article.
    ///
    /// Merges discovery output with registry entries matching the article's
    /// country (or global), language and theme; scores by authority with a
    /// government bonus; persists with the same replace-automatic discipline
    /// as internal links. An article without a country still gets links from
    /// global-scope domains.
    pub async fn generate_external_links(&self, article: &Article) -> Result<ExternalLinkOutcome> {
        let discovered = match self.discovery.discover_links(article).await {
            Ok(candidates) => candidates,
            Err(error) => {
                warn!(
                    article_id = article.id,
                    error = %error,
                    "discovery provider failed; continuing with registry only"
                );
                Vec::new()
            }
        };

        let registry = self
            .registry
            .active_for_scope(article.country_code.as_deref(), &article.language_code)
            .await?;

        // One candidate per domain, best authority wins; discovery URLs are
        // deeper than the registry's site roots so they take the slot on ties.
        let mut by_domain: HashMap<String, DiscoveredLink> = HashMap::new();
        let registry_candidates = registry
            .into_iter()
            .filter(|d| d.covers_theme(article.theme.as_deref()))
            .map(|d| DiscoveredLink {
                url: format!("https://{}/", d.domain),
                title: d.name,
                domain: d.domain,
                source_type: d.source_type,
                authority_score: d.authority_score,
            });
        for mut candidate in discovered.into_iter().chain(registry_candidates) {
            let Some(domain) = candidate.effective_domain() else {
                debug!(url = %candidate.url, "candidate without a usable domain, skipped");
                continue;
            };
            candidate.domain = domain.clone();
            match by_domain.get(&domain) {
                Some(existing) if existing.authority_score >= candidate.authority_score => {}
                _ => {
                    by_domain.insert(domain, candidate);
                }
            }
        }

        if by_domain.is_empty() {
            debug!(article_id = article.id, "no external link candidates");
            let created = self.links.replace_automatic(article.id, Vec::new()).await?;
            return Ok(ExternalLinkOutcome { created });
        }

        let mut candidates: Vec<DiscoveredLink> = by_domain.into_values().collect();
        // HashMap order is arbitrary; fix it before the stable ranking sort
        candidates.sort_by(|a, b| a.domain.cmp(&b.domain));

        let government_bonus = self.config.external.government_bonus;
        let ranked = rank_candidates(
            candidates,
            |candidate| {
                let bonus = if candidate.source_type == AuthoritySourceType::Government {
                    government_bonus
                } else {
                    0.0
                };
                candidate.authority_score + bonus
            },
            self.config.external.max_links_per_article,
        );

        let structure = analyze(&article.content);
        let zones = structure.placement_zones(self.config.min_paragraph_words());
        let placements = if zones.is_empty() {
            Vec::new()
        } else {
            calculate_uniform_distribution(
                ranked.len(),
                &zones,
                self.config.external.max_per_paragraph,
            )?
        };

        let now = Utc::now();
        let mut rows = Vec::with_capacity(ranked.len());
        let mut insertions = Vec::new();
        for (i, scored) in ranked.iter().enumerate() {
            let anchor =
                locale::localize_external_link_title(&scored.item.domain, &article.language_code);
            if let Some(placement) = placements.get(i) {
                insertions.push(Insertion {
                    position: placement.zone_end,
                    markup: anchor_markup(&scored.item.url, &anchor, None, None),
                });
            }
            rows.push(ExternalLink {
                id: 0,
                article_id: article.id,
                url: scored.item.url.clone(),
                domain: scored.item.domain.clone(),
                anchor_text: anchor,
                source_type: scored.item.source_type,
                is_automatic: true,
                verification_status: VerificationStatus::Pending,
                created_at: now,
            });
        }

        let created = self.links.replace_automatic(article.id, rows).await?;

        if self.config.external.rewrite_content && !insertions.is_empty() {
            let rewritten = inject_anchors(&article.content, &insertions);
            self.articles.update_content(article.id, &rewritten).await?;
        }

        info!(article_id = article.id, created, "external links regenerated");
        Ok(ExternalLinkOutcome { created })
    }

    /// Run a verification pass over an article's external links.
    ///
    /// Liveness checking is delegated to the injected provider; this only
    /// drives the status transitions. A provider failure leaves the link in
    /// its current state.
    pub async fn verify_article_links(
        &self,
        article: &Article,
        verifier: &dyn VerificationProvider,
    ) -> Result<VerificationOutcome> {
        let links = self.links.for_article(article.id).await?;
        let total = links.len();
        let mut verified = 0;

        for link in links {
            match verifier.check(&link.url).await {
                Ok(true) => {
                    self.links
                        .update_verification_status(link.id, VerificationStatus::Verified)
                        .await?;
                    verified += 1;
                }
                Ok(false) => {
                    self.links
                        .update_verification_status(link.id, VerificationStatus::Broken)
                        .await?;
                }
                Err(error) => {
                    warn!(
                        url = %link.url,
                        error = %error,
                        "verification provider failed; leaving status unchanged"
                    );
                }
            }
        }

        info!(article_id = article.id, total, verified, "verification pass complete");
        Ok(VerificationOutcome { total, verified })
    }
}
