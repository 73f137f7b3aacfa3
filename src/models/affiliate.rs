//! Affiliate offer models and the article↔offer association.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::Article;

/// How an offer's commission is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommissionType {
    /// Percentage of the sale.
    Percentage,
    /// Fixed amount per conversion.
    Fixed,
}

impl CommissionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommissionType::Percentage => "percentage",
            CommissionType::Fixed => "fixed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "percentage" => Some(CommissionType::Percentage),
            "fixed" => Some(CommissionType::Fixed),
            _ => None,
        }
    }
}

/// A monetizable offer that can be injected into matching articles.
///
/// Offers never expire by row deletion — the temporal window
/// (`starts_at`/`expires_at`) is evaluated at selection time.
#[derive(Debug, Clone)]
pub struct AffiliateLink {
    pub id: i32,
    pub platform_id: i32,
    pub service_name: String,
    pub service_slug: String,
    pub tracking_url: String,
    pub commission_rate: f64,
    pub commission_type: CommissionType,
    /// `None` means the offer applies in every country.
    pub country_codes: Option<Vec<String>>,
    pub language_codes: Vec<String>,
    /// Themes the offer is relevant for; empty means any theme.
    pub themes: Vec<String>,
    /// Curated anchor texts per language code.
    pub custom_anchors: HashMap<String, Vec<String>>,
    pub priority: i32,
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl AffiliateLink {
    /// Whether the offer's temporal window holds at `now`.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.starts_at.map_or(true, |starts| now >= starts)
            && self.expires_at.map_or(true, |expires| now <= expires)
    }

    /// Hard eligibility filter: active, live, and matching the article's
    /// country, language and theme.
    pub fn matches_article(&self, article: &Article, now: DateTime<Utc>) -> bool {
        if !self.is_active || !self.is_live_at(now) {
            return false;
        }
        let country_ok = match &self.country_codes {
            None => true,
            Some(codes) => article
                .country_code
                .as_deref()
                .is_some_and(|c| codes.iter().any(|code| code == c)),
        };
        if !country_ok {
            return false;
        }
        if !self
            .language_codes
            .iter()
            .any(|l| l == &article.language_code)
        {
            return false;
        }
        // Theme match is required unless the offer is theme-wildcard
        if self.themes.is_empty() {
            return true;
        }
        article
            .theme
            .as_deref()
            .is_some_and(|t| self.themes.iter().any(|theme| theme == t))
    }

    /// Theme relevance for scoring: exact match beats wildcard coverage.
    pub fn theme_relevance(&self, theme: Option<&str>) -> f64 {
        match theme {
            Some(t) if self.themes.iter().any(|theme| theme == t) => 1.0,
            _ if self.themes.is_empty() => 0.3,
            _ => 0.0,
        }
    }
}

/// Persisted association between an article and an injected offer.
/// Unique per (article, affiliate link) — re-running injection never
/// duplicates.
#[derive(Debug, Clone)]
pub struct ArticleAffiliateLink {
    pub id: i32,
    pub article_id: i32,
    pub affiliate_link_id: i32,
    pub anchor_text: String,
    pub created_at: DateTime<Utc>,
}

/// Read-only aggregate over a platform's affiliate state.
#[derive(Debug, Clone, PartialEq)]
pub struct AffiliateStats {
    pub total_links: u64,
    pub active_links: u64,
    pub total_insertions: u64,
    pub average_commission: f64,
}
