//! linkweaver — automated content-linking engine.
//!
//! Given a published article, decides which internal articles, external
//! authority sources and affiliate offers to link to, where in the document
//! each link goes, and what localized anchor text it carries — across nine
//! languages, without human curation.
//!
//! The crate is a library invoked by a queue worker. Each generation call
//! runs the same pipeline: load candidates, filter hard constraints, score
//! and rank, place links via the uniform distribution engine, localize
//! anchors, persist idempotently, optionally rewrite the stored content.
//! Discovery and link verification are injected collaborators; the engine
//! never fetches pages itself.

pub mod config;
pub mod content;
pub mod distribution;
pub mod error;
pub mod locale;
pub mod models;
pub mod repository;
pub mod schema;
pub mod scoring;
pub mod services;

pub use config::LinkingConfig;
pub use error::{LinkingError, Result};
