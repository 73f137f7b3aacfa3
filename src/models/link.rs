//! Link edge models: internal article-to-article edges, external authority
//! links and the authority domain registry entries behind them.

use chrono::{DateTime, Utc};

/// Stylistic category of anchor phrasing.
///
/// Services rotate through [`AnchorType::ROTATION`] when generating a batch of
/// links so repeated anchors don't all read the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorType {
    ExactMatch,
    LongTail,
    Cta,
    Generic,
    Question,
}

impl AnchorType {
    /// Rotation order used when diversifying a batch of generated anchors.
    pub const ROTATION: [AnchorType; 5] = [
        AnchorType::ExactMatch,
        AnchorType::LongTail,
        AnchorType::Cta,
        AnchorType::Question,
        AnchorType::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnchorType::ExactMatch => "exact_match",
            AnchorType::LongTail => "long_tail",
            AnchorType::Cta => "cta",
            AnchorType::Generic => "generic",
            AnchorType::Question => "question",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "exact_match" => Some(AnchorType::ExactMatch),
            "long_tail" => Some(AnchorType::LongTail),
            "cta" => Some(AnchorType::Cta),
            "generic" => Some(AnchorType::Generic),
            "question" => Some(AnchorType::Question),
            _ => None,
        }
    }
}

/// A same-language edge between two articles.
///
/// Automatic edges are replaceable on regeneration; manual edges
/// (`is_automatic == false`) are never deleted or recreated by the engine.
/// The pair (source, target) is unique and a source never links to itself.
#[derive(Debug, Clone)]
pub struct InternalLink {
    pub id: i32,
    pub source_article_id: i32,
    pub target_article_id: i32,
    pub anchor_text: String,
    pub anchor_type: AnchorType,
    /// Relevance of the target for the source, 0–100.
    pub relevance_score: f64,
    pub is_automatic: bool,
    pub created_at: DateTime<Utc>,
}

/// Category of an external authority source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthoritySourceType {
    Government,
    Academic,
    News,
    Organization,
    Custom,
}

impl AuthoritySourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthoritySourceType::Government => "government",
            AuthoritySourceType::Academic => "academic",
            AuthoritySourceType::News => "news",
            AuthoritySourceType::Organization => "organization",
            AuthoritySourceType::Custom => "custom",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "government" => Some(AuthoritySourceType::Government),
            "academic" => Some(AuthoritySourceType::Academic),
            "news" => Some(AuthoritySourceType::News),
            "organization" => Some(AuthoritySourceType::Organization),
            "custom" => Some(AuthoritySourceType::Custom),
            _ => None,
        }
    }
}

/// A registered external site with a trust score.
///
/// `country_code == None` means globally applicable. `languages` and `topics`
/// narrow which articles the domain may be linked from.
#[derive(Debug, Clone)]
pub struct AuthorityDomain {
    pub id: i32,
    pub domain: String,
    pub name: String,
    pub source_type: AuthoritySourceType,
    pub country_code: Option<String>,
    pub languages: Vec<String>,
    pub topics: Vec<String>,
    /// Trust score, 0–100.
    pub authority_score: f64,
    pub is_active: bool,
}

impl AuthorityDomain {
    /// Whether this domain may serve an article with the given scope.
    ///
    /// A global domain (no country) matches any article; a country-scoped
    /// domain requires an exact country match. The article language must be
    /// in the domain's language set.
    pub fn matches_scope(&self, country_code: Option<&str>, language_code: &str) -> bool {
        let country_ok = match (&self.country_code, country_code) {
            (None, _) => true,
            (Some(own), Some(wanted)) => own == wanted,
            (Some(_), None) => false,
        };
        country_ok && self.languages.iter().any(|l| l == language_code)
    }

    /// Whether this domain covers the given theme. An empty topic list is a
    /// wildcard; so is an article without a theme.
    pub fn covers_theme(&self, theme: Option<&str>) -> bool {
        match theme {
            Some(theme) if !self.topics.is_empty() => self.topics.iter().any(|t| t == theme),
            _ => true,
        }
    }
}

/// Liveness state of an external link. The engine owns the state machine
/// (pending → verified | broken); the HTTP check itself is an injected
/// collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    Pending,
    Verified,
    Broken,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Broken => "broken",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(VerificationStatus::Pending),
            "verified" => Some(VerificationStatus::Verified),
            "broken" => Some(VerificationStatus::Broken),
            _ => None,
        }
    }
}

/// An outbound link from an article to an external authority source.
/// Unique per (article, url).
#[derive(Debug, Clone)]
pub struct ExternalLink {
    pub id: i32,
    pub article_id: i32,
    pub url: String,
    pub domain: String,
    pub anchor_text: String,
    pub source_type: AuthoritySourceType,
    pub is_automatic: bool,
    pub verification_status: VerificationStatus,
    pub created_at: DateTime<Utc>,
}
