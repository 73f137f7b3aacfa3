//! Offset-based anchor injection.
//!
//! Insertions are applied back to front so earlier offsets stay valid while
//! splicing. Positions come from the analyzer's zone offsets.

/// A pending splice: `markup` goes in at byte `position`.
#[derive(Debug, Clone)]
pub struct Insertion {
    pub position: usize,
    pub markup: String,
}

/// Build an `<a>` tag. `rel` and `class` are omitted when `None`.
pub fn anchor_markup(href: &str, text: &str, rel: Option<&str>, class: Option<&str>) -> String {
    let mut tag = format!("<a href=\"{href}\"");
    if let Some(rel) = rel {
        tag.push_str(&format!(" rel=\"{rel}\""));
    }
    if let Some(class) = class {
        tag.push_str(&format!(" class=\"{class}\""));
    }
    tag.push('>');
    tag.push_str(text);
    tag.push_str("</a>");
    tag
}

/// Splice anchor markup into content at the given byte offsets.
///
/// Each insertion is prefixed with a space so the anchor never fuses with
/// the preceding word. Out-of-range positions are clamped to the end.
pub fn inject_anchors(content: &str, insertions: &[Insertion]) -> String {
    let mut ordered: Vec<&Insertion> = insertions.iter().collect();
    ordered.sort_by(|a, b| b.position.cmp(&a.position));

    let mut result = content.to_string();
    for insertion in ordered {
        let at = insertion.position.min(result.len());
        result.insert_str(at, &format!(" {}", insertion.markup));
    }
    result
}
