//! Internal linking: same-language article-to-article edges.

use chrono::Utc;
use tracing::{debug, info};

use crate::config::LinkingConfig;
use crate::content::{analyze, anchor_markup, inject_anchors, visible_text, Insertion};
use crate::distribution::calculate_uniform_distribution;
use crate::error::Result;
use crate::locale;
use crate::models::{AnchorType, Article, InternalLink};
use crate::repository::{ArticleRepository, InternalLinkRepository};
use crate::scoring::{lexical_overlap, rank_candidates};

/// Result of one internal link generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalLinkOutcome {
    /// Automatic rows inserted (pairs already covered by a manual row are
    /// skipped and not counted).
    pub created: usize,
}

/// Generates the internal link set for an article.
pub struct InternalLinkingService {
    articles: ArticleRepository,
    links: InternalLinkRepository,
    config: LinkingConfig,
}

impl InternalLinkingService {
    /// Build the service, failing fast on invalid configuration.
    pub fn new(
        articles: ArticleRepository,
        links: InternalLinkRepository,
        config: LinkingConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            articles,
            links,
            config,
        })
    }

    /// Regenerate the automatic internal links of an article.
    ///
    /// Candidates are published articles in the same language; the language
    /// filter is hard and the article never links to itself. Manual edges
    /// survive any number of regenerations, and re-running without state
    /// change produces the same row count.
    pub async fn generate_internal_links(&self, article: &Article) -> Result<InternalLinkOutcome> {
        let candidates = self
            .articles
            .published_in_language(&article.language_code, article.id)
            .await?;

        if candidates.is_empty() {
            debug!(article_id = article.id, "no internal link candidates");
            let created = self.links.replace_automatic(article.id, Vec::new()).await?;
            return Ok(InternalLinkOutcome { created });
        }

        let weights = self.config.internal.weights.clone();
        let weight_total = weights.theme + weights.country + weights.lexical;
        let source_text = format!("{} {}", article.title, visible_text(&article.content));

        let ranked = rank_candidates(
            candidates,
            |candidate| {
                let theme = match (&article.theme, &candidate.theme) {
                    (Some(a), Some(b)) if a == b => 1.0,
                    _ => 0.0,
                };
                let country = match (&article.country_code, &candidate.country_code) {
                    (Some(a), Some(b)) if a == b => 1.0,
                    _ => 0.0,
                };
                let candidate_text =
                    format!("{} {}", candidate.title, visible_text(&candidate.content));
                let lexical = lexical_overlap(&source_text, &candidate_text);

                let raw =
                    weights.theme * theme + weights.country * country + weights.lexical * lexical;
                (raw / weight_total * 100.0).clamp(0.0, 100.0)
            },
            self.config.internal.max_links_per_article,
        );

        // Zones may be empty (short or malformed content); links are then
        // recorded for the graph without content injection.
        let structure = analyze(&article.content);
        let zones = structure.placement_zones(self.config.min_paragraph_words());
        let placements = if zones.is_empty() {
            Vec::new()
        } else {
            calculate_uniform_distribution(
                ranked.len(),
                &zones,
                self.config.internal.max_per_paragraph,
            )?
        };

        let now = Utc::now();
        let mut rows = Vec::with_capacity(ranked.len());
        let mut insertions = Vec::new();
        for (i, scored) in ranked.iter().enumerate() {
            let anchor_type = AnchorType::ROTATION[i % AnchorType::ROTATION.len()];
            let anchor = locale::generate_localized_anchor(
                &scored.item.title,
                &article.language_code,
                anchor_type,
            );
            if let Some(placement) = placements.get(i) {
                insertions.push(Insertion {
                    position: placement.zone_end,
                    markup: anchor_markup(
                        &format!("/articles/{}", scored.item.id),
                        &anchor,
                        None,
                        None,
                    ),
                });
            }
            rows.push(InternalLink {
                id: 0,
                source_article_id: article.id,
                target_article_id: scored.item.id,
                anchor_text: anchor,
                anchor_type,
                relevance_score: scored.score,
                is_automatic: true,
                created_at: now,
            });
        }

        let created = self.links.replace_automatic(article.id, rows).await?;

        if self.config.internal.rewrite_content && !insertions.is_empty() {
            let rewritten = inject_anchors(&article.content, &insertions);
            self.articles.update_content(article.id, &rewritten).await?;
        }

        info!(article_id = article.id, created, "internal links regenerated");
        Ok(InternalLinkOutcome { created })
    }
}
