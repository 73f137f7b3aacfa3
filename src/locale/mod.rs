//! Multilingual anchor adapter.
//!
//! Language code normalization, script/heuristic language detection,
//! localized anchor generation, RTL wrapping and locale-aware number
//! formatting. Shared by all three linking services. Nothing here fails:
//! unsupported languages fall back to English.

mod phrases;

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::AnchorType;
use phrases::phrases_for;

/// The nine supported languages.
pub const SUPPORTED_LANGUAGES: [&str; 9] = ["fr", "en", "es", "de", "pt", "ru", "zh", "ar", "hi"];

/// Right-to-left languages within the supported set.
const RTL_LANGUAGES: [&str; 1] = ["ar"];

/// Known aliases mapping onto supported codes.
static ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("cn", "zh"),
        ("zh-hans", "zh"),
        ("zh-hant", "zh"),
        ("in", "hi"),
        ("gb", "en"),
        ("us", "en"),
        ("br", "pt"),
        ("mx", "es"),
    ])
});

/// Latin-script stopwords used for heuristic detection.
static STOPWORDS: LazyLock<HashMap<&'static str, &'static [&'static str]>> = LazyLock::new(|| {
    HashMap::from([
        (
            "fr",
            &[
                "le", "la", "les", "des", "une", "est", "que", "pour", "dans", "avec", "sur",
                "pas", "vous", "nous", "être",
            ][..],
        ),
        (
            "en",
            &[
                "the", "and", "of", "to", "is", "that", "for", "with", "you", "this", "are",
                "have", "from", "not", "will",
            ][..],
        ),
        (
            "es",
            &[
                "el", "los", "las", "que", "una", "es", "para", "con", "por", "del", "más",
                "como", "pero", "este", "ser",
            ][..],
        ),
        (
            "de",
            &[
                "der", "die", "das", "und", "ist", "von", "mit", "für", "auf", "ein", "eine",
                "nicht", "sie", "sich", "werden",
            ][..],
        ),
        (
            "pt",
            &[
                "os", "as", "que", "uma", "para", "com", "não", "mais", "como", "mas", "são",
                "você", "ser", "dos", "pelo",
            ][..],
        ),
    ])
});

/// Minimum stopword hits before a Latin-script guess is trusted.
const MIN_STOPWORD_HITS: usize = 2;

/// Normalize a language code: case fold, strip region subtags, map aliases.
/// `fr-FR` → `fr`, `CN` → `zh`.
pub fn normalize_language(code: &str) -> String {
    let lowered = code.trim().to_lowercase();
    if let Some(&mapped) = ALIASES.get(lowered.as_str()) {
        return mapped.to_string();
    }
    let primary = lowered
        .split(['-', '_'])
        .next()
        .unwrap_or(&lowered)
        .to_string();
    match ALIASES.get(primary.as_str()) {
        Some(&mapped) => mapped.to_string(),
        None => primary,
    }
}

/// Whether the (normalized) code is one of the nine supported languages.
pub fn is_language_supported(code: &str) -> bool {
    let normalized = normalize_language(code);
    SUPPORTED_LANGUAGES.contains(&normalized.as_str())
}

/// Whether the (normalized) code is written right to left.
pub fn is_rtl(code: &str) -> bool {
    let normalized = normalize_language(code);
    RTL_LANGUAGES.contains(&normalized.as_str())
}

/// Deterministic phrase pick so the same base text always yields the same
/// anchor (regeneration stability) while different targets vary.
fn pick<'a>(options: &[&'a str], base: &str) -> &'a str {
    let seed = base
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
    options[seed % options.len()]
}

/// Generate a localized anchor for the given base text and anchor type.
///
/// `exact_match` returns the base unchanged; `generic` ignores it. Falls
/// back to the English table for unsupported languages — never fails.
pub fn generate_localized_anchor(base: &str, language: &str, anchor_type: AnchorType) -> String {
    if anchor_type == AnchorType::ExactMatch {
        return base.to_string();
    }

    let normalized = normalize_language(language);
    let table = phrases_for(&normalized);
    let options = match anchor_type {
        AnchorType::LongTail => table.long_tail,
        AnchorType::Cta => table.cta,
        AnchorType::Question => table.question,
        AnchorType::Generic => table.generic,
        AnchorType::ExactMatch => unreachable!(),
    };
    pick(options, base).replace("{}", base)
}

/// Localized "Visit {domain}" phrasing for external link anchors.
pub fn localize_external_link_title(domain: &str, language: &str) -> String {
    match normalize_language(language).as_str() {
        "fr" => format!("Consulter {domain}"),
        "es" => format!("Visitar {domain}"),
        "de" => format!("{domain} besuchen"),
        "pt" => format!("Visitar {domain}"),
        "ru" => format!("Посетить {domain}"),
        "zh" => format!("访问 {domain}"),
        "ar" => format!("زيارة {domain}"),
        "hi" => format!("{domain} देखें"),
        _ => format!("Visit {domain}"),
    }
}

/// Wrap content in a right-to-left container for RTL languages.
/// Passthrough for everything else.
pub fn prepare_content(html: &str, language: &str) -> String {
    if is_rtl(language) {
        format!("<div dir=\"rtl\">{html}</div>")
    } else {
        html.to_string()
    }
}

/// Detect the language of a text sample.
///
/// Distinctive scripts win outright (CJK → zh, Arabic → ar, Devanagari → hi,
/// Cyrillic → ru). Latin-script text is scored by stopword frequency over
/// fr/en/es/de/pt; short or ambiguous input returns `None`.
pub fn detect_language(text: &str) -> Option<String> {
    let mut cjk = 0usize;
    let mut arabic = 0usize;
    let mut devanagari = 0usize;
    let mut cyrillic = 0usize;

    for c in text.chars() {
        match c {
            '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' => cjk += 1,
            '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}' => arabic += 1,
            '\u{0900}'..='\u{097F}' => devanagari += 1,
            '\u{0400}'..='\u{04FF}' => cyrillic += 1,
            _ => {}
        }
    }

    let scripts = [
        (cjk, "zh"),
        (arabic, "ar"),
        (devanagari, "hi"),
        (cyrillic, "ru"),
    ];
    if let Some(&(count, language)) = scripts.iter().max_by_key(|(count, _)| *count) {
        if count >= 2 {
            return Some(language.to_string());
        }
    }

    // Latin fallback: stopword frequency
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return None;
    }

    let mut scores: Vec<(&str, usize)> = STOPWORDS
        .iter()
        .map(|(&language, stopwords)| {
            let hits = words.iter().filter(|w| stopwords.contains(w)).count();
            (language, hits)
        })
        .collect();
    scores.sort_by(|a, b| b.1.cmp(&a.1));

    let (language, hits) = scores[0];
    let runner_up = scores.get(1).map_or(0, |s| s.1);
    // A tie between two languages is ambiguous, not a guess
    if hits >= MIN_STOPWORD_HITS && hits > runner_up {
        Some(language.to_string())
    } else {
        None
    }
}

/// Format a number with the locale's grouping and decimal conventions.
/// Fractions round to two decimal places; integers print bare.
pub fn format_number(value: f64, language: &str) -> String {
    let normalized = normalize_language(language);
    let (group, decimal) = match normalized.as_str() {
        "fr" | "ru" => (' ', ','),
        "de" | "es" | "pt" => ('.', ','),
        _ => (',', '.'),
    };

    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let grouped = if normalized == "hi" {
        group_indian(&digits, group)
    } else {
        group_thousands(&digits, group)
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if fraction > 0 {
        out.push(decimal);
        out.push_str(&format!("{fraction:02}"));
    }
    out
}

/// Standard grouping: separator every three digits from the right.
fn group_thousands(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Indian-system grouping: last three digits, then pairs (12,34,567).
fn group_indian(digits: &str, separator: char) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(len - 3);
    let mut out = String::new();
    let head_len = head.len();
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head_len - i) % 2 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out.push(separator);
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_regions_and_maps_aliases() {
        assert_eq!(normalize_language("fr-FR"), "fr");
        assert_eq!(normalize_language("PT_br"), "pt");
        assert_eq!(normalize_language("CN"), "zh");
        assert_eq!(normalize_language("zh-Hans"), "zh");
    }

    #[test]
    fn supported_languages_accept_region_variants() {
        assert!(is_language_supported("fr-FR"));
        assert!(is_language_supported("cn"));
        assert!(is_language_supported("AR"));
        assert!(!is_language_supported("ja"));
        assert!(!is_language_supported("tr"));
    }

    #[test]
    fn exact_match_returns_base_unchanged() {
        let anchor = generate_localized_anchor("visa Schengen", "fr", AnchorType::ExactMatch);
        assert_eq!(anchor, "visa Schengen");
    }

    #[test]
    fn question_anchors_end_with_a_question_mark() {
        for language in SUPPORTED_LANGUAGES {
            let anchor = generate_localized_anchor("visa", language, AnchorType::Question);
            assert!(
                anchor.ends_with('?') || anchor.ends_with('？'),
                "{language}: {anchor}"
            );
        }
    }

    #[test]
    fn long_tail_interpolates_base_text() {
        let anchor = generate_localized_anchor("carte bancaire", "fr", AnchorType::LongTail);
        assert!(anchor.contains("carte bancaire"));
    }

    #[test]
    fn generic_ignores_base_text() {
        let anchor = generate_localized_anchor("Some Title", "en", AnchorType::Generic);
        assert!(!anchor.contains("Some Title"));
    }

    #[test]
    fn unsupported_language_falls_back_to_english() {
        let anchor = generate_localized_anchor("visas", "ja", AnchorType::Cta);
        let english = generate_localized_anchor("visas", "en", AnchorType::Cta);
        assert_eq!(anchor, english);
    }

    #[test]
    fn same_base_yields_stable_anchor() {
        let a = generate_localized_anchor("stable title", "fr", AnchorType::LongTail);
        let b = generate_localized_anchor("stable title", "fr", AnchorType::LongTail);
        assert_eq!(a, b);
    }

    #[test]
    fn cyrillic_detects_as_russian() {
        assert_eq!(
            detect_language("Это подробное руководство по визам").as_deref(),
            Some("ru")
        );
    }

    #[test]
    fn scripts_detect_directly() {
        assert_eq!(detect_language("这是一份签证指南").as_deref(), Some("zh"));
        assert_eq!(detect_language("هذا دليل التأشيرات").as_deref(), Some("ar"));
        assert_eq!(detect_language("यह वीज़ा गाइड है").as_deref(), Some("hi"));
    }

    #[test]
    fn latin_languages_detect_by_stopwords() {
        assert_eq!(
            detect_language("the guide is useful for all of you and this helps").as_deref(),
            Some("en")
        );
        assert_eq!(
            detect_language("le guide est utile pour vous et pour nous dans la ville").as_deref(),
            Some("fr")
        );
    }

    #[test]
    fn short_or_ambiguous_input_detects_nothing() {
        assert_eq!(detect_language("ok"), None);
        assert_eq!(detect_language("12345 67890"), None);
    }

    #[test]
    fn rtl_content_is_wrapped() {
        let wrapped = prepare_content("<p>مرحبا</p>", "ar");
        assert!(wrapped.starts_with("<div dir=\"rtl\">"));
        assert!(wrapped.ends_with("</div>"));

        let untouched = prepare_content("<p>bonjour</p>", "fr");
        assert_eq!(untouched, "<p>bonjour</p>");
    }

    #[test]
    fn external_titles_are_localized() {
        assert_eq!(
            localize_external_link_title("service-public.fr", "fr"),
            "Consulter service-public.fr"
        );
        assert_eq!(
            localize_external_link_title("usa.gov", "en"),
            "Visit usa.gov"
        );
        // Unsupported falls back to English phrasing
        assert_eq!(
            localize_external_link_title("example.org", "ja"),
            "Visit example.org"
        );
    }

    #[test]
    fn numbers_group_per_locale() {
        assert_eq!(format_number(1_234_567.0, "fr"), "1 234 567");
        assert_eq!(format_number(1_234_567.0, "en"), "1,234,567");
        assert_eq!(format_number(1_234_567.0, "de"), "1.234.567");
        assert_eq!(format_number(1_234_567.0, "hi"), "12,34,567");
    }

    #[test]
    fn decimals_use_locale_separator() {
        assert_eq!(format_number(1234.5, "fr"), "1 234,50");
        assert_eq!(format_number(1234.5, "en"), "1,234.50");
        assert_eq!(format_number(-12.25, "de"), "-12,25");
    }
}
