//! Content structure analysis.
//!
//! Splits an HTML-like body into paragraph and heading zones with byte
//! offsets into the original string. Offsets index the paragraph's inner
//! text (between the opening and closing tag), so a zone's end offset is
//! also a valid anchor injection point.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p(?:\s[^>]*)?>(.*?)</p\s*>").unwrap());

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h([1-6])(?:\s[^>]*)?>(.*?)</h[1-6]\s*>").unwrap());

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<a[\s>]").unwrap());

/// A paragraph zone. `start..end` is the byte range of the inner text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentZone {
    /// Position among all paragraphs (eligible or not), 0-based.
    pub index: usize,
    pub start: usize,
    pub end: usize,
    /// Words in the inner text, markup excluded.
    pub word_count: usize,
    pub has_existing_link: bool,
}

/// A heading zone. `start..end` is the byte range of the inner text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingZone {
    pub level: u8,
    pub start: usize,
    pub end: usize,
}

/// Parsed structure of an article body.
#[derive(Debug, Clone, Default)]
pub struct ContentStructure {
    /// All paragraphs in document order, short ones included.
    pub paragraphs: Vec<ContentZone>,
    pub headings: Vec<HeadingZone>,
}

impl ContentStructure {
    /// Paragraphs long enough to accept a link.
    pub fn eligible_zones(&self, min_words: usize) -> Vec<ContentZone> {
        self.paragraphs
            .iter()
            .filter(|z| z.word_count >= min_words)
            .cloned()
            .collect()
    }

    /// Eligible paragraphs that don't already carry a link — the placement
    /// targets for injection. Keeps regeneration from stacking anchors into
    /// the same paragraph.
    pub fn placement_zones(&self, min_words: usize) -> Vec<ContentZone> {
        self.paragraphs
            .iter()
            .filter(|z| z.word_count >= min_words && !z.has_existing_link)
            .cloned()
            .collect()
    }
}

/// Count words in a fragment, ignoring markup tags.
fn count_words(fragment: &str) -> usize {
    TAG_RE
        .replace_all(fragment, " ")
        .split_whitespace()
        .count()
}

/// Parse an article body into paragraph and heading zones.
///
/// Empty or tag-less input yields empty zone lists; malformed markup is
/// simply skipped, never an error.
pub fn analyze(html: &str) -> ContentStructure {
    let mut structure = ContentStructure::default();

    for (index, captures) in PARAGRAPH_RE.captures_iter(html).enumerate() {
        let inner = captures.get(1).expect("paragraph capture");
        let text = inner.as_str();
        structure.paragraphs.push(ContentZone {
            index,
            start: inner.start(),
            end: inner.end(),
            word_count: count_words(text),
            has_existing_link: ANCHOR_RE.is_match(text),
        });
    }

    for captures in HEADING_RE.captures_iter(html) {
        let level = captures
            .get(1)
            .and_then(|m| m.as_str().parse::<u8>().ok())
            .unwrap_or(1);
        let inner = captures.get(2).expect("heading capture");
        structure.headings.push(HeadingZone {
            level,
            start: inner.start(),
            end: inner.end(),
        });
    }

    structure
}

/// Extract the visible text of an HTML fragment, markup stripped.
/// Used by lexical scoring, where a full parse beats tag-regex stripping.
pub fn visible_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment.root_element().text().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG: &str = "one two three four five six seven eight nine ten \
                        eleven twelve thirteen fourteen fifteen sixteen seventeen \
                        eighteen nineteen twenty";

    #[test]
    fn paragraphs_are_indexed_in_order() {
        let html = format!("<p>{LONG}</p><h2>Section</h2><p>{LONG} extra</p>");
        let structure = analyze(&html);

        assert_eq!(structure.paragraphs.len(), 2);
        assert_eq!(structure.paragraphs[0].index, 0);
        assert_eq!(structure.paragraphs[1].index, 1);
        assert_eq!(structure.paragraphs[0].word_count, 20);
        assert_eq!(structure.paragraphs[1].word_count, 21);
        assert_eq!(structure.headings.len(), 1);
        assert_eq!(structure.headings[0].level, 2);
    }

    #[test]
    fn zone_offsets_point_at_inner_text() {
        let html = "<p class=\"lead\">hello world</p>";
        let structure = analyze(html);
        let zone = &structure.paragraphs[0];
        assert_eq!(&html[zone.start..zone.end], "hello world");
    }

    #[test]
    fn short_paragraphs_are_kept_but_not_eligible() {
        let html = format!("<p>too short</p><p>{LONG}</p>");
        let structure = analyze(&html);

        assert_eq!(structure.paragraphs.len(), 2);
        let eligible = structure.eligible_zones(20);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].index, 1);
    }

    #[test]
    fn markup_does_not_count_as_words() {
        let html = "<p><strong>two</strong> <em>words</em></p>";
        let structure = analyze(html);
        assert_eq!(structure.paragraphs[0].word_count, 2);
    }

    #[test]
    fn existing_links_are_flagged() {
        let html = format!("<p>{LONG} <a href=\"/x\">link</a></p><p>{LONG}</p>");
        let structure = analyze(&html);

        assert!(structure.paragraphs[0].has_existing_link);
        assert!(!structure.paragraphs[1].has_existing_link);
        assert_eq!(structure.placement_zones(20).len(), 1);
    }

    #[test]
    fn empty_and_tagless_input_yield_no_zones() {
        assert!(analyze("").paragraphs.is_empty());
        let structure = analyze("just plain text without markup");
        assert!(structure.paragraphs.is_empty());
        assert!(structure.headings.is_empty());
    }

    #[test]
    fn visible_text_strips_markup() {
        let text = visible_text("<p>hello <strong>big</strong> world</p>");
        assert!(text.contains("hello"));
        assert!(text.contains("big"));
        assert!(!text.contains("<strong>"));
    }
}
