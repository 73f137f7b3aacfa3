//! Uniform link distribution.
//!
//! Given K links and the analyzer's eligible zones, picks target zones so
//! link density stays as flat as possible. Also audits an already-linked
//! document for uniformity.

use std::sync::LazyLock;

use regex::Regex;

use crate::content::{analyze, ContentZone};
use crate::error::{LinkingError, Result};

static ANCHOR_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<a[\s>]").unwrap());

/// A chosen target zone for one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPlacement {
    pub paragraph_index: usize,
    pub zone_start: usize,
    pub zone_end: usize,
}

impl LinkPlacement {
    fn from_zone(zone: &ContentZone) -> Self {
        Self {
            paragraph_index: zone.index,
            zone_start: zone.start,
            zone_end: zone.end,
        }
    }
}

/// Uniformity audit of an already-linked document.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionReport {
    /// True when the per-paragraph spread is at most one link.
    pub is_uniform: bool,
    pub min_per_paragraph: usize,
    pub max_per_paragraph: usize,
    /// Population variance of per-paragraph link counts.
    pub variance: f64,
}

/// Assign `link_count` links to zones as evenly as possible.
///
/// With `link_count <= zones.len()` the selection walks the zone list at a
/// fixed stride, guaranteeing distinct zones and adjacent gaps differing by
/// at most one. With more links than zones it cycles the zones in order,
/// never exceeding `max_per_zone` per zone; demand beyond
/// `zones.len() * max_per_zone` is truncated rather than over-allocated.
pub fn calculate_uniform_distribution(
    link_count: usize,
    zones: &[ContentZone],
    max_per_zone: usize,
) -> Result<Vec<LinkPlacement>> {
    if max_per_zone == 0 {
        return Err(LinkingError::InvalidConfig(
            "max_per_zone must be at least 1".into(),
        ));
    }
    if link_count == 0 || zones.is_empty() {
        return Ok(Vec::new());
    }

    let zone_count = zones.len();
    if link_count <= zone_count {
        let stride = zone_count as f64 / link_count as f64;
        let mut used = vec![false; zone_count];
        let mut placements = Vec::with_capacity(link_count);
        for i in 0..link_count {
            let mut index = ((i as f64) * stride).round() as usize;
            if index >= zone_count {
                index = zone_count - 1;
            }
            // Rounding can land on a taken zone; advance to the next free one
            while used[index] {
                index = (index + 1) % zone_count;
            }
            used[index] = true;
            placements.push(LinkPlacement::from_zone(&zones[index]));
        }
        return Ok(placements);
    }

    let capacity = zone_count * max_per_zone;
    let assigned = link_count.min(capacity);
    let mut placements = Vec::with_capacity(assigned);
    for i in 0..assigned {
        placements.push(LinkPlacement::from_zone(&zones[i % zone_count]));
    }
    Ok(placements)
}

/// Re-parse an already-linked document and audit its link spread.
///
/// Counts existing anchors per eligible paragraph and reports the
/// population variance of those counts. A document with no eligible
/// paragraphs is trivially uniform.
pub fn validate_distribution(content: &str, min_paragraph_words: usize) -> DistributionReport {
    let structure = analyze(content);
    let zones = structure.eligible_zones(min_paragraph_words);

    if zones.is_empty() {
        return DistributionReport {
            is_uniform: true,
            min_per_paragraph: 0,
            max_per_paragraph: 0,
            variance: 0.0,
        };
    }

    let counts: Vec<usize> = zones
        .iter()
        .map(|zone| ANCHOR_OPEN_RE.find_iter(&content[zone.start..zone.end]).count())
        .collect();

    let min = *counts.iter().min().expect("non-empty counts");
    let max = *counts.iter().max().expect("non-empty counts");
    let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
    let variance = counts
        .iter()
        .map(|&c| {
            let d = c as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / counts.len() as f64;

    DistributionReport {
        is_uniform: max - min <= 1,
        min_per_paragraph: min,
        max_per_paragraph: max,
        variance,
    }
}
