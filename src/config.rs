//! Configuration for the linking engine.
//!
//! All tunables are passed explicitly into service constructors — nothing is
//! read from ambient global state, so generation calls stay pure and testable.
//! Deployments may layer a TOML file over the defaults via [`LinkingConfig::from_toml_str`].

use serde::Deserialize;

use crate::error::{LinkingError, Result};

/// Default minimum word count for a paragraph to accept a link.
pub const DEFAULT_MIN_PARAGRAPH_WORDS: usize = 20;

/// Scoring weights for internal link candidates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InternalWeights {
    /// Weight of exact theme equality.
    pub theme: f64,
    /// Weight of country code equality.
    pub country: f64,
    /// Weight of lexical title/content overlap.
    pub lexical: f64,
}

impl Default for InternalWeights {
    fn default() -> Self {
        Self {
            theme: 0.4,
            country: 0.2,
            lexical: 0.4,
        }
    }
}

/// Scoring weights for affiliate offers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AffiliateWeights {
    /// Weight of the commission rate.
    pub commission: f64,
    /// Weight of the offer priority.
    pub priority: f64,
    /// Weight of theme relevance.
    pub relevance: f64,
}

impl Default for AffiliateWeights {
    fn default() -> Self {
        Self {
            commission: 0.5,
            priority: 0.3,
            relevance: 0.2,
        }
    }
}

/// Tunables for internal (article-to-article) linking.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InternalLinkingConfig {
    /// Maximum automatic internal links per article.
    pub max_links_per_article: usize,
    /// Maximum links placed into a single paragraph.
    pub max_per_paragraph: usize,
    /// Whether to rewrite stored content with injected anchors.
    pub rewrite_content: bool,
    /// Candidate scoring weights.
    pub weights: InternalWeights,
}

impl Default for InternalLinkingConfig {
    fn default() -> Self {
        Self {
            max_links_per_article: 12,
            max_per_paragraph: 2,
            rewrite_content: true,
            weights: InternalWeights::default(),
        }
    }
}

/// Tunables for external (authority source) linking.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExternalLinkingConfig {
    /// Maximum automatic external links per article. Kept lower than the
    /// internal cap so outbound links stay scarce.
    pub max_links_per_article: usize,
    /// Maximum links placed into a single paragraph.
    pub max_per_paragraph: usize,
    /// Whether to rewrite stored content with injected anchors.
    pub rewrite_content: bool,
    /// Score bonus for government/official sources.
    pub government_bonus: f64,
}

impl Default for ExternalLinkingConfig {
    fn default() -> Self {
        Self {
            max_links_per_article: 3,
            max_per_paragraph: 1,
            rewrite_content: true,
            government_bonus: 15.0,
        }
    }
}

/// Tunables for affiliate link injection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AffiliateLinkingConfig {
    /// Maximum affiliate offers injected per article.
    pub max_per_article: usize,
    /// Maximum links placed into a single paragraph.
    pub max_per_paragraph: usize,
    /// Whether injected anchors carry `rel="sponsored"`.
    pub sponsored_attribute: bool,
    /// Offer scoring weights.
    pub weights: AffiliateWeights,
}

impl Default for AffiliateLinkingConfig {
    fn default() -> Self {
        Self {
            max_per_article: 2,
            max_per_paragraph: 1,
            sponsored_attribute: true,
            weights: AffiliateWeights::default(),
        }
    }
}

/// Minimum eligible paragraph word count, newtype so the default (20)
/// survives serde and stays in one place.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(transparent)]
pub struct MinParagraphWords(pub usize);

impl Default for MinParagraphWords {
    fn default() -> Self {
        Self(DEFAULT_MIN_PARAGRAPH_WORDS)
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkingConfig {
    /// Minimum word count for a paragraph to be link-eligible.
    pub min_paragraph_words: MinParagraphWords,
    /// Internal linking section.
    pub internal: InternalLinkingConfig,
    /// External linking section.
    pub external: ExternalLinkingConfig,
    /// Affiliate linking section.
    pub affiliate: AffiliateLinkingConfig,
}

impl LinkingConfig {
    /// Parse a TOML deployment file layered over the defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|e| LinkingError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Effective minimum paragraph word count.
    pub fn min_paragraph_words(&self) -> usize {
        self.min_paragraph_words.0
    }

    /// Fail fast on nonsensical values. Called by every service constructor.
    pub fn validate(&self) -> Result<()> {
        if self.min_paragraph_words.0 == 0 {
            return Err(LinkingError::InvalidConfig(
                "min_paragraph_words must be at least 1".into(),
            ));
        }
        for (name, value) in [
            (
                "internal.max_links_per_article",
                self.internal.max_links_per_article,
            ),
            (
                "external.max_links_per_article",
                self.external.max_links_per_article,
            ),
            ("affiliate.max_per_article", self.affiliate.max_per_article),
            ("internal.max_per_paragraph", self.internal.max_per_paragraph),
            ("external.max_per_paragraph", self.external.max_per_paragraph),
            (
                "affiliate.max_per_paragraph",
                self.affiliate.max_per_paragraph,
            ),
        ] {
            if value == 0 {
                return Err(LinkingError::InvalidConfig(format!(
                    "{name} must be at least 1"
                )));
            }
        }
        let w = &self.internal.weights;
        let a = &self.affiliate.weights;
        for (name, value) in [
            ("internal.weights.theme", w.theme),
            ("internal.weights.country", w.country),
            ("internal.weights.lexical", w.lexical),
            ("affiliate.weights.commission", a.commission),
            ("affiliate.weights.priority", a.priority),
            ("affiliate.weights.relevance", a.relevance),
            ("external.government_bonus", self.external.government_bonus),
        ] {
            if value < 0.0 {
                return Err(LinkingError::InvalidConfig(format!(
                    "{name} must not be negative"
                )));
            }
        }
        if w.theme + w.country + w.lexical == 0.0 {
            return Err(LinkingError::InvalidConfig(
                "internal.weights must not all be zero".into(),
            ));
        }
        if a.commission + a.priority + a.relevance == 0.0 {
            return Err(LinkingError::InvalidConfig(
                "affiliate.weights must not all be zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        LinkingConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_cap_is_rejected() {
        let mut config = LinkingConfig::default();
        config.internal.max_links_per_article = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut config = LinkingConfig::default();
        config.affiliate.weights.commission = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = LinkingConfig::from_toml_str(
            r#"
            min_paragraph_words = 30

            [internal]
            max_links_per_article = 6

            [affiliate]
            sponsored_attribute = false
            "#,
        )
        .unwrap();

        assert_eq!(config.min_paragraph_words(), 30);
        assert_eq!(config.internal.max_links_per_article, 6);
        assert!(!config.affiliate.sponsored_attribute);
        // Untouched sections keep their defaults
        assert_eq!(config.external.max_links_per_article, 3);
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let err = LinkingConfig::from_toml_str("min_paragraph_words = \"many\"").unwrap_err();
        assert!(matches!(err, LinkingError::InvalidConfig(_)));
    }
}
