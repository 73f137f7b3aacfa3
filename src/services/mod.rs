//! Service layer: the three linking engines.
//!
//! Each service runs the same pipeline — load candidates, filter hard
//! constraints, score and rank, place via the distribution engine, localize
//! anchors, persist idempotently — over its own candidate kind. Services
//! are independent; a failure in one never blocks the others.

pub mod affiliate;
pub mod external;
pub mod internal;

pub use affiliate::{AffiliateLinkService, AffiliateOutcome};
pub use external::{
    DiscoveredLink, DiscoveryProvider, ExternalLinkOutcome, ExternalLinkingService,
    VerificationOutcome, VerificationProvider,
};
pub use internal::{InternalLinkOutcome, InternalLinkingService};
