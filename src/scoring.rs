//! Shared candidate ranking.
//!
//! The three link kinds score with structurally similar but distinct
//! formulas. The shared shape is "weigh each candidate, sort descending,
//! take the top N" — services supply the weight closure, this module owns
//! the plumbing plus the lexical-overlap heuristic.

use std::cmp::Ordering;
use std::collections::HashSet;

/// A candidate with its computed score.
#[derive(Debug, Clone)]
pub struct Scored<T> {
    pub item: T,
    pub score: f64,
}

/// Score every candidate, sort descending and keep the top `limit`.
///
/// Ties keep input order (stable sort), which makes regeneration
/// deterministic for equal-scoring candidates.
pub fn rank_candidates<T>(
    candidates: Vec<T>,
    score_fn: impl Fn(&T) -> f64,
    limit: usize,
) -> Vec<Scored<T>> {
    let mut scored: Vec<Scored<T>> = candidates
        .into_iter()
        .map(|item| {
            let score = score_fn(&item);
            Scored { item, score }
        })
        .collect();
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(limit);
    scored
}

/// Minimum term length considered by the overlap heuristic. Shorter tokens
/// are mostly function words and inflate overlap across unrelated texts.
const MIN_TERM_LEN: usize = 4;

fn terms(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= MIN_TERM_LEN)
        .map(str::to_string)
        .collect()
}

/// Lexical overlap between two texts: shared distinct terms over the
/// smaller term set, 0–1. A lightweight theme-match heuristic, not TF-IDF.
pub fn lexical_overlap(a: &str, b: &str) -> f64 {
    let terms_a = terms(a);
    let terms_b = terms(b);
    if terms_a.is_empty() || terms_b.is_empty() {
        return 0.0;
    }
    let shared = terms_a.intersection(&terms_b).count();
    let smaller = terms_a.len().min(terms_b.len());
    (shared as f64 / smaller as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_sorts_descending_and_truncates() {
        let ranked = rank_candidates(vec![1, 5, 3, 9, 2], |&n| n as f64, 3);
        let values: Vec<i32> = ranked.iter().map(|s| s.item).collect();
        assert_eq!(values, vec![9, 5, 3]);
        assert_eq!(ranked[0].score, 9.0);
    }

    #[test]
    fn ties_keep_input_order() {
        let ranked = rank_candidates(vec!["first", "second"], |_| 1.0, 2);
        assert_eq!(ranked[0].item, "first");
    }

    #[test]
    fn overlap_is_high_for_related_texts() {
        let a = "Schengen visa application requirements France";
        let b = "France Schengen visa requirements explained";
        assert!(lexical_overlap(a, b) > 0.5);
    }

    #[test]
    fn overlap_is_low_for_unrelated_texts() {
        let a = "Schengen visa application requirements";
        let b = "chocolate cake baking temperature";
        assert_eq!(lexical_overlap(a, b), 0.0);
    }

    #[test]
    fn overlap_of_empty_text_is_zero() {
        assert_eq!(lexical_overlap("", "anything here"), 0.0);
        assert_eq!(lexical_overlap("a an of", "a an of"), 0.0);
    }
}
