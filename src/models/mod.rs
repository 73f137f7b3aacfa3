//! Domain models for articles, link edges and affiliate offers.

mod affiliate;
mod article;
mod link;

pub use affiliate::{
    AffiliateLink, AffiliateStats, ArticleAffiliateLink, CommissionType,
};
pub use article::{Article, ArticleStatus};
pub use link::{
    AnchorType, AuthorityDomain, AuthoritySourceType, ExternalLink, InternalLink,
    VerificationStatus,
};
