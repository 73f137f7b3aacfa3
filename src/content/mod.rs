//! Content analysis and rewriting.
//!
//! Pure functions over an article's HTML body: zone extraction with byte
//! offsets ([`structure`]) and offset-based anchor splicing ([`inject`]).

pub mod inject;
pub mod structure;

pub use inject::{anchor_markup, inject_anchors, Insertion};
pub use structure::{analyze, visible_text, ContentStructure, ContentZone, HeadingZone};
